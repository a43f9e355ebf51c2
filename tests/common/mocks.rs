//! Mock version of the mail transport.
use mockall::mock;

use book_report_rs::core::mail::{EmailReport, MailTransport};

mock! {
    pub Transport {}
    impl MailTransport for Transport {
        fn send(&self, report: &EmailReport) -> bool;
    }
}
