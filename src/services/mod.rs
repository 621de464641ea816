pub mod children;
pub mod display;
pub mod filters;
pub mod groups;
pub mod normalize;
pub mod stats;
pub mod status;
pub mod validation;
