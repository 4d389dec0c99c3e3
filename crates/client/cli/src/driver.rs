//! Line-oriented request loop.

use anyhow::Result;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use runtime::{SessionAction, SessionError, SessionOrchestrator};

/// Error line written in place of a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorLine {
    code: &'static str,
    kind: Option<&'static str>,
    message: String,
}

impl ErrorLine {
    fn parse(error: serde_json::Error) -> Self {
        Self {
            code: "SESSION_BAD_REQUEST",
            kind: None,
            message: error.to_string(),
        }
    }

    fn session(error: &SessionError) -> Self {
        Self {
            code: error.error_code(),
            kind: error.kind().map(|kind| kind.as_str()),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorLine,
}

/// Serves stdin until EOF.
pub async fn run(session: &SessionOrchestrator) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = handle(session, line).await?;
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

async fn handle(session: &SessionOrchestrator, line: &str) -> Result<String> {
    let action: SessionAction = match serde_json::from_str(line) {
        Ok(action) => action,
        Err(error) => {
            tracing::warn!(%error, "unparsable request");
            return Ok(serde_json::to_string(&ErrorEnvelope {
                error: ErrorLine::parse(error),
            })?);
        }
    };

    tracing::debug!(?action, "dispatching");
    match session.dispatch(action).await {
        Ok(response) => Ok(serde_json::to_string(&response)?),
        Err(error) => {
            match error.kind() {
                Some(_) => tracing::debug!(%error, "request rejected"),
                None => tracing::error!(%error, "request failed"),
            }
            Ok(serde_json::to_string(&ErrorEnvelope {
                error: ErrorLine::session(&error),
            })?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_and_rejected_lines_become_error_objects() {
        let session = SessionOrchestrator::builder().build().unwrap();

        let reply = handle(&session, "{not json").await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(json["error"]["code"], "SESSION_BAD_REQUEST");

        let reply = handle(&session, r#"{"action":"getState","matchId":"nope"}"#)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(json["error"]["code"], "SESSION_MATCH_NOT_FOUND");
        assert_eq!(json["error"]["kind"], "not_found");

        let reply = handle(&session, r#"{"action":"listCards"}"#).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(json["kind"], "catalog");
    }
}
