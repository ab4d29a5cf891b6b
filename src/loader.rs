use crate::{
    options::{Boundary, Options, OptionsError},
    Float,
};

#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("line {line}: unknown option `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error("invalid options")]
    Options(#[from] OptionsError),
}

/// Loader loads source to [`Options`].
/// e.g: PlainFileLoader load from file path with one `key value` pair per line
pub trait Loader {
    fn load(&mut self, source: &str) -> Result<Options, LoaderError>;
}

/// Loaders can load options from file.
///
/// Keys missing from the file keep their default, `#` starts a comment.
/// ```text
/// dot_count 150
/// margin reflect
/// triangle.decay none
/// ```
#[derive(Default)]
pub struct PlainFileLoader {}

impl Loader for PlainFileLoader {
    fn load(&mut self, path: &str) -> Result<Options, LoaderError> {
        let value = std::fs::read_to_string(path)?;
        parse_options(&value)
    }
}

/// Parse options from `key value` lines, on top of the defaults
pub fn parse_options(source: &str) -> Result<Options, LoaderError> {
    let mut options = Options::default();

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = match line.split_once('#') {
            Some((content, _comment)) => content,
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let mut iter = line.split_whitespace();
        let (Some(key), value) = (iter.next(), iter.next().unwrap_or_default()) else {
            continue;
        };
        let invalid = || LoaderError::InvalidValue {
            line: line_no,
            key: key.to_string(),
            value: value.to_string(),
        };
        let float = || value.parse::<Float>().map_err(|_| invalid());
        let count = || value.parse::<usize>().map_err(|_| invalid());
        let flag = || value.parse::<bool>().map_err(|_| invalid());

        match key {
            "dot_count" => options.dot_count = count()?,
            "width" => options.surface.width = float()?,
            "height" => options.surface.height = float()?,
            "velocity" => options.velocity = float()?,
            "attract.distance" => options.attract.distance = float()?,
            "attract.intensity" => options.attract.intensity = float()?,
            "repulse.distance" => options.repulse.distance = float()?,
            "repulse.intensity" => options.repulse.intensity = float()?,
            "max_neighbors" => options.max_neighbors = count()?,
            "margin" => {
                options.boundary = match value {
                    "reflect" => Boundary::Reflect,
                    _ => Boundary::Margin(float()?),
                }
            }
            "show_dots" => options.show_dots = flag()?,
            "show_own_connections" => options.show_own_connections = flag()?,
            "dot_size" => options.dot_size = float()?,
            "triangle.decay" => {
                options.triangle.decay = match value {
                    "none" => None,
                    _ => Some(float()?),
                }
            }
            "triangle.max_heat" => options.triangle.max_heat = float()?,
            "triangle.color_amplification" => options.triangle.color_amplification = float()?,
            "move" => options.moving = flag()?,
            _ => {
                return Err(LoaderError::UnknownKey {
                    line: line_no,
                    key: key.to_string(),
                })
            }
        }
    }

    options.validate()?;
    Ok(options)
}
