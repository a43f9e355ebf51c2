/// This module provides the CSV reader of book catalogs.
pub mod csv;

/// This module provides the plain-text and HTML report formatter.
pub mod report;
