pub mod pipeline;
pub mod stage0_attribute;
pub mod stage1_consolidate;
pub mod stage2_aggregate;
pub mod stage3_render;

pub use pipeline::*;
pub use stage0_attribute::*;
pub use stage1_consolidate::*;
pub use stage2_aggregate::*;
pub use stage3_render::*;
