// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: media files, settings and the platform services the
//! editor talks to.

pub mod capture;
pub mod download;
pub mod library;
pub mod media;
pub mod picker;
pub mod serialization;
