//! Tunables for the menu effect.
//!
//! Everything has a default matching the stock page. A page may override a
//! subset through `data-*` attributes on the container element, e.g.
//! `<main data-images="a.jpg,b.jpg" data-ease="0.08">`.

use glam::{UVec2, Vec2};

use crate::error::{MenuError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Camera distance from the z = 0 plane, in CSS pixels.
    pub perspective: f32,
    pub near: f32,
    pub far: f32,
    /// World size of the image plane.
    pub mesh_size: Vec2,
    pub segments: UVec2,
    /// Fraction of the remaining distance covered each frame.
    pub ease: f32,
    /// Scale from pointer lag (pixels) to the `uOffset` uniform.
    pub distortion: f32,
    pub dimmed_opacity: f32,
    pub container: String,
    pub list: String,
    pub links: String,
    /// One image per link, in document order.
    pub images: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            perspective: 1000.0,
            near: 0.1,
            far: 1000.0,
            mesh_size: Vec2::new(250.0, 350.0),
            segments: UVec2::new(20, 20),
            ease: 0.1,
            distortion: 0.0005,
            dimmed_opacity: 0.2,
            container: "main".into(),
            list: "ul".into(),
            links: "li".into(),
            images: (1..=4).map(|n| format!("img/{n}.jpg")).collect(),
        }
    }
}

impl Config {
    /// Apply overrides from a `data-*` lookup. `lookup` receives the
    /// attribute name without the `data-` prefix.
    pub fn apply_dataset<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("images") {
            let images: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if images.is_empty() {
                return Err(invalid("images", &raw));
            }
            self.images = images;
        }
        if let Some(raw) = lookup("perspective") {
            self.perspective = positive("perspective", &raw)?;
            // The plane sits `perspective` in front of the camera and must
            // stay inside the far plane.
            if self.perspective >= self.far {
                self.far = self.perspective * 2.0;
            }
        }
        if let Some(raw) = lookup("ease") {
            let ease = number("ease", &raw)?;
            if ease <= 0.0 || ease > 1.0 {
                return Err(invalid("ease", &raw));
            }
            self.ease = ease;
        }
        if let Some(raw) = lookup("distortion") {
            self.distortion = number("distortion", &raw)?;
        }
        if let Some(raw) = lookup("dimmed-opacity") {
            let opacity = number("dimmed-opacity", &raw)?;
            if !(0.0..=1.0).contains(&opacity) {
                return Err(invalid("dimmed-opacity", &raw));
            }
            self.dimmed_opacity = opacity;
        }
        Ok(self)
    }
}

fn invalid(key: &str, value: &str) -> MenuError {
    MenuError::InvalidConfig {
        key: key.into(),
        value: value.into(),
    }
}

fn number(key: &str, raw: &str) -> Result<f32> {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(key, raw)),
    }
}

fn positive(key: &str, raw: &str) -> Result<f32> {
    let v = number(key, raw)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(invalid(key, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dataset(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        let cfg = Config::default().apply_dataset(|_| None).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.images.len(), 4);
    }

    #[test]
    fn images_are_split_and_trimmed() {
        let cfg = Config::default()
            .apply_dataset(dataset(&[("images", " a.jpg, b.jpg ,,c.png ")]))
            .unwrap();
        assert_eq!(cfg.images, vec!["a.jpg", "b.jpg", "c.png"]);
    }

    #[test]
    fn numeric_overrides() {
        let cfg = Config::default()
            .apply_dataset(dataset(&[
                ("ease", "0.25"),
                ("perspective", "800"),
                ("distortion", "0.001"),
                ("dimmed-opacity", "0.5"),
            ]))
            .unwrap();
        assert_eq!(cfg.ease, 0.25);
        assert_eq!(cfg.perspective, 800.0);
        assert_eq!(cfg.distortion, 0.001);
        assert_eq!(cfg.dimmed_opacity, 0.5);
    }

    #[test]
    fn deep_perspective_pushes_far_plane_back() {
        let cfg = Config::default()
            .apply_dataset(dataset(&[("perspective", "1500")]))
            .unwrap();
        assert_eq!(cfg.perspective, 1500.0);
        assert!(cfg.far > cfg.perspective);

        let shallow = Config::default()
            .apply_dataset(dataset(&[("perspective", "600")]))
            .unwrap();
        assert_eq!(shallow.far, Config::default().far);
    }

    #[test]
    fn rejects_bad_values() {
        for (key, value) in [
            ("ease", "fast"),
            ("ease", "0"),
            ("ease", "1.5"),
            ("perspective", "-10"),
            ("perspective", "0"),
            ("perspective", "inf"),
            ("dimmed-opacity", "2"),
            ("images", " , "),
        ] {
            let err = Config::default()
                .apply_dataset(dataset(&[(key, value)]))
                .unwrap_err();
            assert_eq!(
                err,
                MenuError::InvalidConfig {
                    key: key.into(),
                    value: value.into()
                }
            );
        }
    }
}
