//! Line-oriented console over any async reader/writer pair.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::CliError;

const PROMPT: &str = "> ";

/// Reads answers and writes text for one console user.
///
/// Generic so tests can script stdin with a byte slice and capture stdout
/// in a `Vec<u8>`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` followed by a newline.
    pub async fn say(&mut self, text: &str) -> Result<(), CliError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Shows `question` (if any) and the prompt, then reads one line.
    ///
    /// The trailing newline is removed; `InputClosed` is returned at EOF.
    pub async fn ask(&mut self, question: &str) -> Result<String, CliError> {
        if !question.is_empty() {
            self.output.write_all(question.as_bytes()).await?;
            self.output.write_all(b"\n").await?;
        }
        self.output.write_all(PROMPT.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
