// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sticker data structures.
//!
//! This module defines the selectable sticker assets and the transform
//! (translation and size) that the user applies to the active sticker.

use std::sync::{Arc, Mutex, MutexGuard};

/// One of the statically enumerated sticker images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StickerAsset(usize);

impl StickerAsset {
    /// Number of stickers shipped with the application.
    pub const COUNT: usize = 6;

    /// All stickers in display order.
    pub fn all() -> impl Iterator<Item = StickerAsset> {
        (0..Self::COUNT).map(StickerAsset)
    }

    /// Look up a sticker by its position in the set.
    #[cfg(test)]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(StickerAsset(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A 2D translation in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// A single recognized gesture acting on a sticker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Incremental pan update carrying the delta since the previous event.
    Pan { dx: f32, dy: f32 },
    /// Two taps recognized within the platform's double-tap window.
    DoubleTap,
}

/// Translation and size of the active sticker.
///
/// `scale` is the rendered edge length in logical pixels. It starts at
/// `base_size` and can only ever be `base_size` or `base_size * 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerTransform {
    pub offset: Offset,
    pub scale: f32,
    base_size: f32,
}

impl StickerTransform {
    /// Create an untouched transform for a sticker of the given size.
    pub fn new(base_size: f32) -> Self {
        Self {
            offset: Offset::new(0.0, 0.0),
            scale: base_size,
            base_size,
        }
    }

    /// Whether the one-shot double-tap enlargement has happened.
    pub fn is_doubled(&self) -> bool {
        self.scale == self.base_size * 2.0
    }

    /// Translate by a pan delta. The offset is not clamped to the frame.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.offset.dx += dx;
        self.offset.dy += dy;
    }

    /// Double the size unless it is already doubled.
    pub fn double_tap(&mut self) {
        if self.scale != self.base_size * 2.0 {
            self.scale *= 2.0;
        }
    }

    pub fn apply(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Pan { dx, dy } => self.drag(dx, dy),
            GestureEvent::DoubleTap => self.double_tap(),
        }
    }
}

#[derive(Debug)]
struct SharedTransform {
    transform: StickerTransform,
    revision: u64,
}

/// Observable transform shared between gesture handling and rendering.
///
/// Every gesture event is applied under one lock acquisition, so a reader
/// never observes half of a pan update. The revision increases by one per
/// applied event and lets renderers skip work when nothing changed.
#[derive(Debug, Clone)]
pub struct TransformHandle {
    inner: Arc<Mutex<SharedTransform>>,
}

impl TransformHandle {
    pub fn new(base_size: f32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SharedTransform {
                transform: StickerTransform::new(base_size),
                revision: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SharedTransform> {
        // A panicking writer cannot leave a half-applied event behind, so
        // the poisoned value is still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply one gesture event atomically.
    pub fn apply(&self, event: GestureEvent) {
        let mut shared = self.lock();
        shared.transform.apply(event);
        shared.revision += 1;
        log::debug!("Sticker transform {:?} after {:?}", shared.transform, event);
    }

    /// Current transform value.
    pub fn snapshot(&self) -> StickerTransform {
        self.lock().transform
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }
}
