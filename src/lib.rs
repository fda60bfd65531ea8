//! Orbitview - star system hierarchy viewer
//!
//! A library crate providing the dataset import, hierarchy and scene
//! components for testing and integration purposes.

pub mod animation;
pub mod camera;
pub mod dataset;
pub mod hierarchy;
pub mod input;
pub mod picking;
pub mod render;
pub mod selection;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
