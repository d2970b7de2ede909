use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies the workspace config.toml next to the built `catalog` binary,
/// where the config loader looks for it at runtime.
fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(workspace_root) = manifest_dir.parent().and_then(Path::parent) else {
        println!("cargo:warning=workspace root not found, config.toml not copied");
        return;
    };
    let source_config = workspace_root.join("config.toml");
    println!("cargo:rerun-if-changed={}", source_config.display());

    // OUT_DIR looks like target/<profile>/build/catalog-xxxx/out
    let (Ok(out_dir), Ok(profile)) = (env::var("OUT_DIR"), env::var("PROFILE")) else {
        return;
    };
    let Some(profile_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=target/{} not found, config.toml not copied", profile);
        return;
    };

    if !source_config.exists() {
        println!("cargo:warning=config.toml not found at {:?}, the embedded default will be used", source_config);
        return;
    }
    let dest_config = profile_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        println!("cargo:warning=Cannot copy config.toml to {:?}: {}", dest_config, e);
    }
}
