//! Plugin descriptors that make the game load the created archives.

use crate::error::{Error, Result};
use crate::naming::descriptor_name;
use bgs_game::GameType;
use camino::{Utf8Path, Utf8PathBuf};

/// Template used when no game specific one exists.
pub const FALLBACK_TEMPLATE: &str = "template.esp";

/// Produces one plugin descriptor per archive.
///
/// Descriptor `i` is paired with archive `i` by position, not by name:
/// `MyMod.esp` goes with `MyMod.bsa`, while `MyMod_0.esp` goes with
/// `MyMod_pack0.bsa` (see [`descriptor_name`] and
/// [`archive_file_name`](crate::naming::archive_file_name)).
pub trait EspFactory: Send + Sync {
    fn create(
        &self,
        mod_name: &str,
        output_dir: &Utf8Path,
        game: GameType,
        archive_paths: &[Utf8PathBuf],
    ) -> Result<Vec<Utf8PathBuf>>;
}

/// Copies an empty template plugin for every archive.
#[derive(Debug, Clone)]
pub struct TemplateEspFactory {
    template_dir: Utf8PathBuf,
}

impl TemplateEspFactory {
    pub fn new(template_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    /// `<template_dir>/<game id>.esp`, or `template.esp` if that is missing.
    pub fn template_for(&self, game: GameType) -> Result<Utf8PathBuf> {
        let specific = self.template_dir.join(format!("{}.esp", game.id()));
        if specific.is_file() {
            return Ok(specific);
        }

        let fallback = self.template_dir.join(FALLBACK_TEMPLATE);
        if fallback.is_file() {
            return Ok(fallback);
        }

        Err(Error::TemplateNotFound(specific))
    }
}

impl EspFactory for TemplateEspFactory {
    fn create(
        &self,
        mod_name: &str,
        output_dir: &Utf8Path,
        game: GameType,
        archive_paths: &[Utf8PathBuf],
    ) -> Result<Vec<Utf8PathBuf>> {
        if archive_paths.is_empty() {
            return Ok(Vec::new());
        }

        let template = self.template_for(game)?;
        std::fs::create_dir_all(output_dir)?;

        let mut created = Vec::with_capacity(archive_paths.len());
        for index in 0..archive_paths.len() {
            let path = output_dir.join(format!("{}.esp", descriptor_name(mod_name, index)));
            std::fs::copy(&template, &path)?;
            tracing::debug!("Created plugin {}", path);
            created.push(path);
        }

        Ok(created)
    }
}
