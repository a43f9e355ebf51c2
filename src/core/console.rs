use std::io::{self, BufRead, Write};

/// Interactive front end used by the report job.
///
/// The job never touches the terminal directly, which keeps it drivable
/// from tests with a scripted implementation.
pub trait Console {
    /// Shows `question` and returns the answer line without its line ending.
    ///
    /// Returns `None` once input is exhausted.
    fn prompt(&self, question: &str) -> Option<String>;

    /// Shows an informational message.
    fn show(&self, message: &str);
}

/// `Console` backed by the process standard input and output.
#[derive(Default)]
pub struct StdConsole {}

impl Console for StdConsole {
    fn prompt(&self, question: &str) -> Option<String> {
        print!("{}", question);
        io::stdout().flush().ok();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn show(&self, message: &str) {
        println!("{}", message);
    }
}
