pub mod branch;
pub mod confirm;
pub mod drop_legacy_python;
pub mod error;
pub mod guarded;
pub mod re_enable_gha;
pub mod repository_list;
pub mod repository_validation;
pub mod toolbox;
pub mod workflow_list;
pub mod working_dir;
