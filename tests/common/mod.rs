#![allow(dead_code)]

mod mocks;

use std::{cell::RefCell, collections::VecDeque, io::Write};

use book_report_rs::core::console::Console;
use tempfile::NamedTempFile;

pub use mocks::MockTransport;

/// Writes `content` to a fresh `.csv` file that lives as long as the handle.
pub fn csv_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("books")
        .suffix(".csv")
        .tempfile()
        .expect("Unable to create temporary file");
    file.write_all(content.as_bytes())
        .expect("Unable to write temporary file");
    file
}

/// Console answering prompts from a script and recording what it shows.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: RefCell<VecDeque<String>>,
    questions: RefCell<Vec<String>>,
    shown: RefCell<Vec<String>>,
}

impl ScriptedConsole {
    pub fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }

    pub fn output(&self) -> String {
        self.shown.borrow().join("\n")
    }
}

impl Console for ScriptedConsole {
    fn prompt(&self, question: &str) -> Option<String> {
        self.questions.borrow_mut().push(question.to_string());
        self.answers.borrow_mut().pop_front()
    }

    fn show(&self, message: &str) {
        self.shown.borrow_mut().push(message.to_string());
    }
}
