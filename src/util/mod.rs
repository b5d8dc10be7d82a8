// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shared helpers for geometry and animation.

pub mod geometry;
pub mod spring;
