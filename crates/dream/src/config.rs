//! Settings read from the environment.

use std::{
    env::{self, VarError},
    str::FromStr,
};

use anyhow::{bail, Context};

/// Viewing and noise parameters, see the [crate-level docs](crate#environment-variables) for the
/// variables they are read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seed of the noise field.
    pub noise_seed: u64,
    /// Vertical field of view, in degrees.
    pub fov_degrees: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
    /// Distance of the near clipping plane.
    pub near: f32,
    /// Distance of the far clipping plane.
    pub far: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            noise_seed: 0,
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Config {
    /// Reads the configuration from the `DREAM_*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails if a variable is set to something that doesn't parse, or if the resulting values
    /// don't describe a usable projection.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let config = Self {
            noise_seed: parse_var(&lookup, "DREAM_NOISE_SEED", defaults.noise_seed)?,
            fov_degrees: parse_var(&lookup, "DREAM_FOV_DEGREES", defaults.fov_degrees)?,
            aspect: parse_var(&lookup, "DREAM_ASPECT", defaults.aspect)?,
            near: parse_var(&lookup, "DREAM_NEAR", defaults.near)?,
            far: parse_var(&lookup, "DREAM_FAR", defaults.far)?,
        };
        config.validate()?;
        log::debug!("using {config:?}");
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            bail!(
                "field of view must be between 0 and 180 degrees, got {}",
                self.fov_degrees
            );
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            bail!("aspect ratio must be positive, got {}", self.aspect);
        }
        if !(self.near > 0.0 && self.near < self.far && self.far.is_finite()) {
            bail!(
                "clipping planes must satisfy 0 < near < far, got near={} far={}",
                self.near,
                self.far
            );
        }
        Ok(())
    }

    /// The vertical field of view in radians.
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

fn parse_var<T>(
    lookup: impl Fn(&str) -> Result<String, VarError>,
    name: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("invalid value set for `{name}` variable: '{value}'")),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(s)) => bail!(
            "invalid value set for `{name}` variable: {}",
            s.to_string_lossy()
        ),
    }
}
