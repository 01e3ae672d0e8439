//! UI utilities for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

fn prompt(nickname: &str) -> String {
    format!("{}> ", nickname)
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(nickname: &str) {
    print!("{}", prompt(nickname));
    std::io::stdout().flush().ok();
}

/// Spawn a blocking thread for rustyline and forward each non-empty line
///
/// 再接続をまたいで同じ入力チャネルを使います。
/// Ctrl+C / Ctrl+D でチャネルが閉じます。
pub fn spawn_input_reader(nickname: &str) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = prompt(nickname);

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
