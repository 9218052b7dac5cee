use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Line based question/answer exchange over any reader and writer. The CLI wires it to
/// stdin/stdout, tests feed it byte slices.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Asks a single question. End of input counts as an empty answer.
    pub async fn ask(&mut self, prompt: &str) -> Result<String> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;
        let mut line = String::new();
        self.input.read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }

    /// Collects items until an empty line (or end of input).
    pub async fn ask_list(&mut self, bullet: &str) -> Result<Vec<String>> {
        let mut items = vec![];
        loop {
            let item = self.ask(bullet).await?;
            if item.is_empty() {
                return Ok(items);
            }
            items.push(item);
        }
    }

    pub async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(prompt).await?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
