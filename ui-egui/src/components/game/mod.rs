// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game-related UI components

mod status;

pub use status::{result_text, GameStatusText};
