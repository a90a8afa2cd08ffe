// SPDX-License-Identifier: MPL-2.0
//! Shared styles for the gallery surfaces.

pub mod button;
pub mod container;
