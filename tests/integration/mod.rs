//! Integration tests for the scan → snapshot → search pipeline

mod cli_contracts;
mod scan_pipeline;
mod support;
