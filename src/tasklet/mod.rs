//! # Tasklet Module
//!
//! This module provides tasklet implementations for single operations that run
//! after the report is rendered.

#[cfg(feature = "mail")]
#[cfg_attr(docsrs, doc(cfg(feature = "mail")))]
pub mod mail;
