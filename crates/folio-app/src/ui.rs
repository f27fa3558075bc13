//! Page shell using bevy_egui
//!
//! The portfolio sections render in a scrollable side panel; the central
//! area stays clear so the 3D showcase shows through behind the hero text.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use folio_core::Content;
use folio_scene::ViewportState;

/// Portfolio content exposed to the UI systems
#[derive(Resource)]
pub struct PageContent(pub Content);

/// UI layout settings for responsive design
#[derive(Debug, Clone, Resource)]
pub struct UiLayout {
    /// Whether the section panel is visible (collapsible on mobile)
    pub show_sections: bool,
    /// Whether the nav menu is expanded (mobile hamburger)
    pub show_nav_menu: bool,
    /// Current screen width
    pub screen_width: f32,
    /// Current screen height
    pub screen_height: f32,
    /// Whether we're on a small screen (mobile/tablet)
    pub is_mobile: bool,
    /// Section heading to scroll to on the next frame
    pub jump_to: Option<String>,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            show_sections: true,
            show_nav_menu: false,
            screen_width: 1920.0,
            screen_height: 1080.0,
            is_mobile: false,
            jump_to: None,
        }
    }
}

impl UiLayout {
    /// Update layout based on screen dimensions
    pub fn update_for_screen(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;

        // Consider mobile if width < 800 or portrait orientation with width < 600
        let was_mobile = self.is_mobile;
        self.is_mobile = width < 800.0 || (width < height && width < 600.0);

        // On first detection of mobile mode, collapse the section panel so
        // the showcase stays visible
        if self.is_mobile && !was_mobile {
            self.show_sections = false;
            self.show_nav_menu = false;
        }
    }

    /// Width of the section panel
    pub fn panel_width(&self) -> f32 {
        if self.is_mobile {
            (self.screen_width * 0.85).min(340.0)
        } else {
            380.0
        }
    }
}

/// Contact form state. Submission stays local: the message is logged and the
/// form shows an acknowledgement.
#[derive(Resource, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub sent: bool,
}

pub struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactForm>()
            .add_systems(Update, (update_ui_layout, forward_layout_to_showcase))
            // Main UI system runs in EguiPrimaryContextPass for proper input handling
            .add_systems(EguiPrimaryContextPass, page_system);
    }
}

/// Update UI layout based on window size
fn update_ui_layout(windows: Query<&Window>, mut ui_layout: ResMut<UiLayout>) {
    if let Ok(window) = windows.single() {
        let width = window.width();
        let height = window.height();

        // Only update if dimensions changed significantly
        if (ui_layout.screen_width - width).abs() > 1.0
            || (ui_layout.screen_height - height).abs() > 1.0
        {
            ui_layout.update_for_screen(width, height);
        }
    }
}

/// Feed the page layout's mobile flag into the showcase as its parent
/// override. The showcase combines this with its own media query, so either
/// signal alone selects the Mobile presets.
fn forward_layout_to_showcase(layout: Res<UiLayout>, mut viewport: ResMut<ViewportState>) {
    if layout.is_changed() {
        viewport.set_parent_is_mobile(layout.is_mobile);
    }
}

fn page_system(
    mut contexts: EguiContexts,
    content: Res<PageContent>,
    mut layout: ResMut<UiLayout>,
    mut contact: ResMut<ContactForm>,
) {
    let is_mobile = layout.is_mobile;

    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Compact spacing on mobile, still touch-friendly
    if is_mobile {
        let mut style = (*ctx.style()).clone();
        style.spacing.button_padding = egui::vec2(6.0, 4.0);
        style.spacing.item_spacing = egui::vec2(4.0, 3.0);
        ctx.set_style(style);
    }

    nav_bar(ctx, &content.0, &mut layout);

    if layout.show_sections {
        let panel_width = layout.panel_width();
        egui::SidePanel::left("sections_panel")
            .default_width(panel_width)
            .resizable(!is_mobile)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let jump = layout.jump_to.take();
                    about_section(ui, &content.0, jump.as_deref());
                    work_section(ui, &content.0, jump.as_deref());
                    tech_section(ui, &content.0);
                    projects_section(ui, &content.0);
                    testimonials_section(ui, &content.0);
                    contact_section(ui, &mut contact, jump.as_deref());
                });
            });
    }
}

/// Top navigation: title plus section links, collapsed to a hamburger on
/// mobile like the original masthead
fn nav_bar(ctx: &egui::Context, content: &Content, layout: &mut UiLayout) {
    let is_mobile = layout.is_mobile;
    egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Adrian | JavaScript Mastery");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if is_mobile {
                    if ui.button("☰").clicked() {
                        layout.show_nav_menu = !layout.show_nav_menu;
                    }
                } else {
                    for link in content.nav_links.iter().rev() {
                        if ui.link(&link.title).clicked() {
                            layout.jump_to = Some(link.id.clone());
                            layout.show_sections = true;
                        }
                    }
                    if ui.small_button(if layout.show_sections { "Hide" } else { "Sections" })
                        .clicked()
                    {
                        layout.show_sections = !layout.show_sections;
                    }
                }
            });
        });

        if is_mobile && layout.show_nav_menu {
            ui.separator();
            for link in &content.nav_links {
                if ui.link(&link.title).clicked() {
                    layout.jump_to = Some(link.id.clone());
                    layout.show_sections = true;
                    layout.show_nav_menu = false;
                }
            }
        }
    });
}

/// Scroll the heading into view when it is the pending nav target
fn section_heading(ui: &mut egui::Ui, id: &str, text: &str, jump: Option<&str>) {
    let response = ui.heading(text);
    if jump == Some(id) {
        response.scroll_to_me(Some(egui::Align::TOP));
    }
    ui.separator();
}

fn about_section(ui: &mut egui::Ui, content: &Content, jump: Option<&str>) {
    section_heading(ui, "about", "Overview", jump);
    ui.label(
        "I'm a skilled software developer with experience in TypeScript and \
         JavaScript, and expertise in frameworks like React, Node.js, and \
         Three.js. I'm a quick learner and collaborate closely with clients to \
         create efficient, scalable, and user-friendly solutions that solve \
         real-world problems.",
    );
    ui.add_space(8.0);

    for service in &content.services {
        ui.group(|ui| {
            ui.strong(&service.title);
        });
    }
    ui.add_space(12.0);
}

fn work_section(ui: &mut egui::Ui, content: &Content, jump: Option<&str>) {
    section_heading(ui, "work", "Work Experience", jump);
    for exp in &content.experiences {
        ui.group(|ui| {
            ui.strong(&exp.title);
            ui.label(&exp.company);
            ui.weak(&exp.date);
            for point in &exp.points {
                ui.label(format!("• {}", point));
            }
        });
        ui.add_space(4.0);
    }
    ui.add_space(12.0);
}

fn tech_section(ui: &mut egui::Ui, content: &Content) {
    ui.heading("Technologies");
    ui.separator();
    ui.horizontal_wrapped(|ui| {
        for tech in &content.technologies {
            let _ = ui.small_button(&tech.name);
        }
    });
    ui.add_space(12.0);
}

fn projects_section(ui: &mut egui::Ui, content: &Content) {
    ui.heading("Projects");
    ui.separator();
    for project in &content.projects {
        ui.group(|ui| {
            ui.strong(&project.name);
            ui.label(&project.description);
            ui.horizontal_wrapped(|ui| {
                for tag in &project.tags {
                    ui.weak(format!("#{}", tag.name));
                }
            });
            ui.hyperlink_to("Source code", &project.source_code_link);
        });
        ui.add_space(4.0);
    }
    ui.add_space(12.0);
}

fn testimonials_section(ui: &mut egui::Ui, content: &Content) {
    ui.heading("Testimonials");
    ui.separator();
    for t in &content.testimonials {
        ui.group(|ui| {
            ui.label(format!("\"{}\"", t.quote));
            ui.weak(format!("{} — {} of {}", t.name, t.designation, t.company));
        });
        ui.add_space(4.0);
    }
    ui.add_space(12.0);
}

fn contact_section(ui: &mut egui::Ui, contact: &mut ContactForm, jump: Option<&str>) {
    section_heading(ui, "contact", "Contact", jump);

    ui.label("Your Name");
    ui.text_edit_singleline(&mut contact.name);
    ui.label("Your Email");
    ui.text_edit_singleline(&mut contact.email);
    ui.label("Your Message");
    ui.text_edit_multiline(&mut contact.message);

    if ui.button("Send").clicked() {
        tracing::info!(
            "Contact message from {} <{}> ({} chars)",
            contact.name,
            contact.email,
            contact.message.len()
        );
        contact.sent = true;
    }
    if contact.sent {
        ui.label("Thank you. I will get back to you as soon as possible.");
    }
    ui.add_space(12.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mobile_detection() {
        let mut layout = UiLayout::default();
        assert!(!layout.is_mobile);

        layout.update_for_screen(480.0, 900.0);
        assert!(layout.is_mobile);
        // Panel collapses on the first flip to mobile
        assert!(!layout.show_sections);

        layout.update_for_screen(1400.0, 900.0);
        assert!(!layout.is_mobile);
    }

    #[test]
    fn test_mobile_panel_width_bounded() {
        let mut layout = UiLayout::default();
        layout.update_for_screen(360.0, 800.0);
        assert!(layout.panel_width() <= 340.0);
        assert!(layout.panel_width() <= layout.screen_width);
    }
}
