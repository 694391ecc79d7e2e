//! Failure types and report rendering.
//!
//! This module provides the failure model ([`FailureReason`],
//! [`ConvertFailure`], [`Failures`]), the grouped report renderer and the
//! terminal [`DecodeError`].

mod failure;
mod report;

pub use failure::{ConvertFailure, FailureReason, Failures};
pub use report::{render_failures, DecodeError};
