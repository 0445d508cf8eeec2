//! Integration tests for the OpsDesk HTTP API.

mod helpers;

mod auth_test;
mod gate_test;
mod presence_test;
mod sse_test;
