//! A filesystem backed store of recipes
//!
//! The [`Directory`] reads every `.json` file at the top level of a folder.
//! Each file holds an array of recipes. The whole set is loaded up front and
//! never changes afterwards.

use std::{
    collections::HashMap,
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use super::{RecipeNotFound, RecipeRepository};
use crate::domain::Recipe;

/// A directory of recipe files, loaded into memory.
#[derive(Debug, Clone)]
pub struct Directory {
    /// The folder the recipes were read from.
    root: PathBuf,
    /// Recipes in load order.
    recipes: Vec<Recipe>,
    /// Recipe identifier to position in `recipes`.
    index: HashMap<String, usize>,
}

/// Errors that abort [`Directory::load`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The recipes path does not exist or cannot be accessed.
    #[error("failed to open directory {}: {source}", path.display())]
    DirectoryNotFound {
        /// The recipes path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The recipes path exists but is not a directory.
    #[error("path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The directory listing failed.
    #[error("failed walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A recipe file could not be read.
    #[error("failed to read file {}: {source}", path.display())]
    Read {
        /// The recipe file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A recipe file is not a valid JSON array of recipes.
    #[error("failed to parse recipes in file {}: {source}", path.display())]
    Parse {
        /// The recipe file.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// Two recipes share an identifier.
    #[error("duplicate recipe ID '{id}' found in file {}", path.display())]
    DuplicateId {
        /// The repeated identifier.
        id: String,
        /// The file holding the second occurrence.
        path: PathBuf,
    },
}

impl Directory {
    /// Load every recipe file in `root`.
    ///
    /// Only `.json` files directly inside `root` are read. Subdirectories
    /// and other files are ignored.
    ///
    /// # Errors
    ///
    /// Loading is all or nothing. It fails if:
    ///
    /// - `root` does not exist or is not a directory
    /// - a recipe file cannot be read or parsed
    /// - two recipes have the same identifier, in the same file or not
    ///
    /// Files are processed in file name order, so the error reported for a
    /// given directory is always the same.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let root = root.into();

        let metadata = fs::metadata(&root).map_err(|source| LoadError::DirectoryNotFound {
            path: root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(LoadError::NotADirectory(root));
        }

        let paths = collect_json_paths(&root)?;

        let parsed: Vec<_> = paths
            .par_iter()
            .map(|path| read_recipe_file(path).map(|recipes| (path, recipes)))
            .collect();

        let mut directory = Self {
            root,
            recipes: Vec::new(),
            index: HashMap::new(),
        };

        for file in parsed {
            let (path, recipes) = file?;
            tracing::debug!("Loaded {} recipes from {}", recipes.len(), path.display());
            for recipe in recipes {
                directory.insert(recipe, path)?;
            }
        }

        tracing::info!(
            "Loaded {} recipes from {} files in {}",
            directory.recipes.len(),
            paths.len(),
            directory.root.display()
        );

        Ok(directory)
    }

    fn insert(&mut self, recipe: Recipe, path: &Path) -> Result<(), LoadError> {
        if self.index.contains_key(&recipe.id) {
            return Err(LoadError::DuplicateId {
                id: recipe.id,
                path: path.to_path_buf(),
            });
        }
        self.index.insert(recipe.id.clone(), self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    /// The folder the recipes were loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The number of loaded recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the directory held no recipes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeRepository for Directory {
    fn find_by_id(&self, id: &str) -> Result<Recipe, RecipeNotFound> {
        self.index
            .get(id)
            .map(|&position| self.recipes[position].clone())
            .ok_or_else(|| RecipeNotFound(id.to_string()))
    }

    fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }
}

fn collect_json_paths(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.path().extension() == Some(OsStr::new("json")) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn read_recipe_file(path: &Path) -> Result<Vec<Recipe>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
