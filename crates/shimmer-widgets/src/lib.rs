//! Skeleton-loading widgets built on `shimmer-core`.
//!
//! The main entry point is [`SkeletonLoader`], a placeholder box that
//! shimmers while content loads. The host attaches the widget when it
//! enters the visible tree, drives time through
//! [`SkeletonLoader::advance`], and detaches it when the real content
//! arrives.

pub mod skeleton_loader;
pub mod sweep;

pub use skeleton_loader::SkeletonLoader;
pub use sweep::{SweepConfig, SweepLoop, SweepPhase, SKELETON_ANIMATION};
