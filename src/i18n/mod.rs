// SPDX-License-Identifier: MPL-2.0
//! Localisation of gallery strings.
//!
//! Bundles are Fluent `.ftl` files embedded at compile time. The active
//! locale comes from the command line, then the config file, then the
//! system locale, falling back to `en-US`.

pub mod fluent;
