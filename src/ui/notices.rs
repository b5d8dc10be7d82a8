// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Short non-blocking messages shown at the bottom of the window.

const NOTICE_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    expires_at: f64,
}

/// Queue of notices, timed against egui's input clock.
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, text: impl Into<String>, kind: NoticeKind, now: f64) {
        self.items.push(Notice {
            text: text.into(),
            kind,
            expires_at: now + NOTICE_SECONDS,
        });
    }

    pub fn info(&mut self, text: impl Into<String>, now: f64) {
        self.push(text, NoticeKind::Info, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: f64) {
        self.push(text, NoticeKind::Error, now);
    }

    /// Drop expired notices.
    pub fn expire(&mut self, now: f64) {
        self.items.retain(|notice| notice.expires_at > now);
    }

    pub fn visible(&self) -> &[Notice] {
        &self.items
    }

    /// Paint the visible notices above the bottom edge of the screen.
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.expire(now);
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .order(egui::Order::Tooltip)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .show(ctx, |ui| {
                for notice in self.visible() {
                    let (fill, text) = match notice.kind {
                        NoticeKind::Info => (egui::Color32::from_gray(235), egui::Color32::from_gray(20)),
                        NoticeKind::Error => (egui::Color32::from_rgb(200, 60, 60), egui::Color32::WHITE),
                    };
                    egui::Frame::none()
                        .fill(fill)
                        .rounding(8.0)
                        .inner_margin(egui::Margin::symmetric(14.0, 8.0))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(&notice.text).color(text));
                        });
                    ui.add_space(6.0);
                }
            });

        // Keep repainting so notices disappear on time
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
