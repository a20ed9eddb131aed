// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Classification API Module
//!
//! This module provides the POST /classify endpoint. It always answers 200
//! for a well-formed body; classifier failures surface as `Other` with zero
//! confidence.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::classify_handler;
pub use request::ClassifyRequest;
pub use response::ClassifyResponse;
