use std::{path::PathBuf, sync::LazyLock};

pub static DEFAULT_SITE_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    let mut path = std::env::home_dir().unwrap_or_default();

    if std::env::var("IREADER_SITE_XDG_PATH").is_ok() {
        path.push(".config")
    }

    path.push("ireader-site");
    path
});

/// Computes the path from the app data directory based on the arguments.
///
/// Returns a `&Path` referencing the app directory itself if no arguments
/// are passed in, or a `PathBuf` created by joining all of the arguments to
/// the base directory if at least one argument is passed in.
#[macro_export]
macro_rules! site_path {
    () => {
        $crate::paths::DEFAULT_SITE_PATH.as_path()
    };

    ( $( $path:expr ),+ $(,)? ) => {
        [
            $crate::paths::DEFAULT_SITE_PATH.as_path(),
            $( std::path::Path::new(&$path) ),+
        ].into_iter().collect::<std::path::PathBuf>()
    };
}
