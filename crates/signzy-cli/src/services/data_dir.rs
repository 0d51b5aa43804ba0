// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data directory resolution.

use std::path::PathBuf;

use signzy_core::error::Result;

const APP_DIR: &str = "signzy";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> Result<PathBuf> {
    let dir = base_dir(|key| std::env::var(key).ok()).join(APP_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// `$XDG_DATA_HOME`, then `$HOME/.local/share`, then `/tmp`.
fn base_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(xdg) = get("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Some(home) = get("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let base = base_dir(|key| match key {
            "XDG_DATA_HOME" => Some("/data".into()),
            "HOME" => Some("/home/asha".into()),
            _ => None,
        });
        assert_eq!(base, PathBuf::from("/data"));
    }

    #[test]
    fn home_falls_back_to_local_share() {
        let base = base_dir(|key| (key == "HOME").then(|| "/home/asha".to_owned()));
        assert_eq!(base, PathBuf::from("/home/asha/.local/share"));
    }

    #[test]
    fn empty_environment_uses_tmp() {
        let base = base_dir(|key| (key == "XDG_DATA_HOME").then(String::new));
        assert_eq!(base, PathBuf::from("/tmp"));
    }
}
