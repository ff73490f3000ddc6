use crate::error::{MenuError, Result};

/// Position of a link in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// Link-to-texture mapping. Exactly one texture per link; the first link's
/// texture is active until another is selected.
#[derive(Debug, Clone)]
pub struct Gallery<T> {
    textures: Vec<T>,
    active: usize,
}

impl<T> Gallery<T> {
    pub fn new(links: usize, textures: Vec<T>) -> Result<Self> {
        if links != textures.len() {
            return Err(MenuError::LinkCountMismatch {
                links,
                textures: textures.len(),
            });
        }
        if textures.is_empty() {
            return Err(MenuError::EmptyGallery);
        }
        Ok(Gallery {
            textures,
            active: 0,
        })
    }

    /// Convert every texture, keeping the active selection.
    pub fn try_map<U, F>(self, f: F) -> Result<Gallery<U>>
    where
        F: FnMut(T) -> Result<U>,
    {
        Ok(Gallery {
            textures: self.textures.into_iter().map(f).collect::<Result<_>>()?,
            active: self.active,
        })
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn select(&mut self, link: LinkId) -> Result<&T> {
        if link.0 >= self.textures.len() {
            return Err(MenuError::UnknownLink {
                index: link.0,
                len: self.textures.len(),
            });
        }
        self.active = link.0;
        Ok(&self.textures[self.active])
    }

    pub fn active_link(&self) -> LinkId {
        LinkId(self.active)
    }

    pub fn active(&self) -> &T {
        &self.textures[self.active]
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.textures.iter()
    }
}
