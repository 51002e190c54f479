//! Integration tests: the service router against an in-process fake of the
//! upstream library API, and the kiosk controller driven over HTTP

mod api_tests;
mod kiosk_flow;
