// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP JSON API for the FrogCrypto feed service.
//!
//! Handlers are thin: they decode the body, call the matching
//! [`FrogCryptoService`](frogcrypto_engine::FrogCryptoService) operation, and
//! map its error onto a status code and `{error, next_eligible_at?}` body.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, bind, build_router, start_server};
