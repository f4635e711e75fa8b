use crate::keyboard::key::PhysicalKey;

/// Modifier state a resolver is asked to apply. Only shift affects drill
/// generation; AltGr is part of the contract for resolvers that have a
/// third level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub altgr: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        altgr: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        altgr: false,
    };

    pub fn shifted(shift: bool) -> Self {
        Self {
            shift,
            altgr: false,
        }
    }
}

/// Maps a scancode plus modifier state to the character the active keyboard
/// layout produces. Implementations must be deterministic for a fixed layout
/// and return `None` for unmapped combinations instead of failing.
pub trait LayoutResolver {
    fn resolve(&self, scancode: u16, modifiers: Modifiers) -> Option<char>;

    fn resolve_key(&self, key: PhysicalKey, modifiers: Modifiers) -> Option<char> {
        self.resolve(key.scancode(), modifiers)
    }
}

impl<R: LayoutResolver + ?Sized> LayoutResolver for &R {
    fn resolve(&self, scancode: u16, modifiers: Modifiers) -> Option<char> {
        (**self).resolve(scancode, modifiers)
    }
}

impl<R: LayoutResolver + ?Sized> LayoutResolver for Box<R> {
    fn resolve(&self, scancode: u16, modifiers: Modifiers) -> Option<char> {
        (**self).resolve(scancode, modifiers)
    }
}
