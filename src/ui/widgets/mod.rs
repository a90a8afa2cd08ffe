// SPDX-License-Identifier: MPL-2.0
pub mod animated_spinner;
pub mod image_frame;

pub use animated_spinner::AnimatedSpinner;
pub use image_frame::ImageFrame;
