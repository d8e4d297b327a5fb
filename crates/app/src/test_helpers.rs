//! Loopback HTTP backend for client tests.

use std::io;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

use crate::{api::ApiClient, config::api::ApiConfig};

/// Request as received by the loopback backend.
#[derive(Debug)]
pub(crate) struct RecordedRequest {
    pub(crate) head: String,
    pub(crate) body: String,
}

impl RecordedRequest {
    /// `METHOD /path?query HTTP/1.1`
    pub(crate) fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    pub(crate) fn json_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Loopback backend that answers a single request.
pub(crate) struct Backend {
    pub(crate) client: ApiClient,
    handle: JoinHandle<io::Result<RecordedRequest>>,
}

impl Backend {
    /// Wait for the request the backend answered.
    pub(crate) async fn request(self) -> io::Result<RecordedRequest> {
        self.handle.await.map_err(io::Error::other)?
    }
}

/// Start a backend that answers one request with `status` and a JSON `body`.
pub(crate) async fn serve_once(status: u16, body: &str) -> io::Result<Backend> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 4096];

        let head_end = loop {
            let read = socket.read(&mut chunk).await?;

            if read == 0 {
                break buffer.len();
            }

            buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());

            if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                break position + 4;
            }
        };

        let head = String::from_utf8_lossy(buffer.get(..head_end).unwrap_or_default()).into_owned();

        let content_length = head
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buffer.len() < head_end + content_length {
            let read = socket.read(&mut chunk).await?;

            if read == 0 {
                break;
            }

            buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
        }

        let request_body =
            String::from_utf8_lossy(buffer.get(head_end..).unwrap_or_default()).into_owned();

        let response = format!(
            "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;

        Ok(RecordedRequest {
            head,
            body: request_body,
        })
    });

    let client = ApiClient::new(&ApiConfig {
        api_url: format!("http://{addr}/api"),
        api_timeout_seconds: 5,
    })
    .map_err(io::Error::other)?;

    Ok(Backend { client, handle })
}

/// Wire form of the Brigadeiro product.
pub(crate) const BRIGADEIRO_JSON: &str = r#"{
    "id": 1,
    "nome": "Brigadeiro",
    "valor": 12.5,
    "valorFormatado": "R$ 12,50",
    "descricao": "Brigadeiro gourmet",
    "imagem": null,
    "disponivel": true,
    "statusDisponibilidade": "Disponível"
}"#;

/// Wire form of the Brigadeiro product as seen by admins.
pub(crate) const ADMIN_BRIGADEIRO_JSON: &str = r#"{
    "id": 1,
    "nome": "Brigadeiro",
    "valor": 12.5,
    "valorFormatado": "R$ 12,50",
    "descricao": "Brigadeiro gourmet",
    "imagem": null,
    "disponivel": false,
    "statusDisponibilidade": "Indisponível",
    "criadoEm": "2024-05-01T10:00:00",
    "atualizadoEm": "2024-05-02T11:30:00"
}"#;
