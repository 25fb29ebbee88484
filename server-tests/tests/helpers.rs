use tokio::net::TcpListener;
use wrapper_local_server::{start_server_http, StatusConfig};

/// Boot the status server on a random OS-assigned port and return its
/// base URL. The advertised port in the body stays whatever the config
/// says, which is the point: the payload is static.
pub async fn setup_server(config: StatusConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        start_server_http(listener, config, std::future::pending())
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}
