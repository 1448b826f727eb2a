//! Top-level data directory names for each game.
//!
//! Path normalization needs to know where a game's data layout begins inside an
//! arbitrary generated path. The static tables below cover the directories every
//! installation ships with; [`scan_data_directory`] adds whatever an actual
//! installation contains (script extender folders, tool output, ...).

use crate::game::GameType;
use camino::Utf8Path;
use std::collections::HashSet;

/// Directories present in every supported game's data folder.
const COMMON_DIRS: &[&str] = &[
    "meshes",
    "textures",
    "sound",
    "music",
    "interface",
    "shaders",
    "shadersfx",
    "video",
    "strings",
    "lodsettings",
    "trees",
    "menus",
    "fonts",
    "scripts",
    "distantlod",
    "lsdata",
];

const OBLIVION_DIRS: &[&str] = &["obse", "facegen", "characters"];

const FALLOUT3_DIRS: &[&str] = &["fose", "dialogueviews", "facegen"];

const FALLOUT_NV_DIRS: &[&str] = &["nvse", "dialogueviews", "facegen", "config"];

const SKYRIM_DIRS: &[&str] = &[
    "skse",
    "seq",
    "grass",
    "dialogueviews",
    "terrain",
    "source",
    "calientetools",
    "netscriptframework",
];

const FALLOUT4_DIRS: &[&str] = &[
    "f4se",
    "materials",
    "vis",
    "programs",
    "seq",
    "terrain",
    "misc",
    "mcm",
];

const STARFIELD_DIRS: &[&str] = &[
    "sfse",
    "materials",
    "geometries",
    "particles",
    "planetdata",
    "terrain",
    "space",
    "naf",
];

/// Lowercase names of the top-level data directories for `game`.
pub fn known_directory_names(game: GameType) -> HashSet<String> {
    let specific = match game {
        GameType::Oblivion => OBLIVION_DIRS,
        GameType::Fallout3 => FALLOUT3_DIRS,
        GameType::FalloutNewVegas => FALLOUT_NV_DIRS,
        GameType::Skyrim | GameType::SkyrimSpecialEdition => SKYRIM_DIRS,
        GameType::Fallout4 => FALLOUT4_DIRS,
        GameType::Starfield => STARFIELD_DIRS,
    };

    COMMON_DIRS
        .iter()
        .chain(specific.iter())
        .map(|name| name.to_string())
        .collect()
}

/// List the top-level directory names (lowercased) of a game's data folder.
///
/// `root` may point either at the data folder itself or at the installation
/// root; in the latter case a `Data` child (matched case-insensitively) is
/// scanned instead.
pub fn scan_data_directory(root: &Utf8Path) -> std::io::Result<HashSet<String>> {
    let data_dir = find_data_child(root)?.unwrap_or_else(|| root.to_path_buf());
    let mut names = HashSet::new();

    for entry in std::fs::read_dir(data_dir.as_std_path())? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name.to_lowercase());
            }
            Err(name) => {
                tracing::warn!("Skipping non-UTF-8 directory name: {:?}", name);
            }
        }
    }

    tracing::debug!("Scanned {} data directories in {}", names.len(), data_dir);
    Ok(names)
}

fn find_data_child(root: &Utf8Path) -> std::io::Result<Option<camino::Utf8PathBuf>> {
    for entry in std::fs::read_dir(root.as_std_path())? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.eq_ignore_ascii_case("data") {
                return Ok(Some(root.join(name)));
            }
        }
    }
    Ok(None)
}
