//! Path utilities.

mod paths;

pub use paths::{
    collect_script_files, config_dir, docs_file, find_manifest, find_project_root,
    global_config_file, local_config_file, preview_file, scripts_dir, DEFAULT_SCRIPTS_DIR,
    MAX_SEARCH_DEPTH,
};
