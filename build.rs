#![forbid(unsafe_code)]

// Build information is logged at startup.  Source trees exported without
// git metadata still build, reporting "unknown" for the git values.
fn main() {
    let branch = build_data::get_git_branch().unwrap_or_else(|_| "unknown".to_string());
    let commit = build_data::get_git_commit_short().unwrap_or_else(|_| "unknown".to_string());
    let dirty = build_data::get_git_dirty()
        .map(|d| d.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    // Using the build time would make the build unreproducible.
    let source_ts = build_data::get_source_time()
        .map(build_data::format_timestamp)
        .unwrap_or_else(|_| "unknown".to_string());
    let rustc = build_data::get_rustc_version().unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_BRANCH={}", branch);
    println!("cargo:rustc-env=GIT_COMMIT_SHORT={}", commit);
    println!("cargo:rustc-env=GIT_DIRTY={}", dirty);
    println!("cargo:rustc-env=SOURCE_TIMESTAMP={}", source_ts);
    println!("cargo:rustc-env=RUSTC_VERSION={}", rustc);
}
