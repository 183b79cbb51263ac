use gtk4::{
    gdk, pango, prelude::*, Align, Box as GtkBox, Button, Image, Label, Orientation, Overlay,
    Widget,
};
use tracing::debug;

use crate::grid::cell::{CellContent, CellSpec};
use crate::grid::layout::{ITEM_HEIGHT, ITEM_WIDTH};
use crate::grid::GridEvent;

const ICON_SIZE: i32 = 64;

/// Builds the button for one grid cell. Clicking it emits
/// [`GridEvent::ItemActivated`] on `sender`.
pub fn tile(spec: &CellSpec, sender: async_channel::Sender<GridEvent>) -> Button {
    let overlay = Overlay::new();
    overlay.set_child(Some(&face(spec.content.clone())));

    let indicator = GtkBox::new(Orientation::Horizontal, 0);
    indicator.add_css_class("indicator");
    indicator.set_halign(Align::Center);
    indicator.set_valign(Align::End);
    indicator.set_margin_bottom(2);
    indicator.set_can_target(false);
    overlay.add_overlay(&indicator);

    let button = Button::builder()
        .child(&overlay)
        .tooltip_text(spec.tooltip.as_str())
        .width_request(ITEM_WIDTH as i32)
        .height_request(ITEM_HEIGHT as i32)
        .focus_on_click(false)
        .build();
    button.set_css_classes(&spec.css_classes());

    let index = spec.index;
    button.connect_clicked(move |_| {
        let _ = sender.try_send(GridEvent::ItemActivated(index));
    });
    button
}

fn face(content: CellContent) -> Widget {
    match content {
        CellContent::Icon { ref uri, .. } => {
            match gdk::Texture::from_file(&gio::File::for_uri(uri)) {
                Ok(texture) => {
                    let image = Image::from_paintable(Some(&texture));
                    image.set_pixel_size(ICON_SIZE);
                    image.upcast()
                }
                Err(e) => {
                    debug!(uri = %uri, error = %e, "Icon failed to load, showing name");
                    face(content.degrade())
                }
            }
        }
        CellContent::Label(text) => {
            let label = Label::builder()
                .label(text.as_str())
                .wrap(true)
                .wrap_mode(pango::WrapMode::WordChar)
                .ellipsize(pango::EllipsizeMode::End)
                .lines(2)
                .max_width_chars(8)
                .justify(gtk4::Justification::Center)
                .halign(Align::Center)
                .valign(Align::Center)
                .build();
            label.add_css_class("fallback-label");
            label.upcast()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::display_uri;

    fn label_text(widget: Widget) -> Option<String> {
        widget
            .downcast::<Label>()
            .ok()
            .map(|label| label.label().to_string())
    }

    // All GTK assertions share one test so GTK is only initialized from a
    // single thread.
    #[test]
    fn unloadable_icons_fall_back_to_name() {
        if gtk4::init().is_err() {
            eprintln!("no display available, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();

        let missing = CellContent::Icon {
            uri: display_uri(dir.path().join("Editor.png")),
            fallback: "Editor".to_string(),
        };
        assert_eq!(label_text(face(missing)).as_deref(), Some("Editor"));

        let garbled_path = dir.path().join("Mail.png");
        std::fs::write(&garbled_path, b"not an image").unwrap();
        let garbled = CellContent::Icon {
            uri: display_uri(&garbled_path),
            fallback: "Mail".to_string(),
        };
        assert_eq!(label_text(face(garbled)).as_deref(), Some("Mail"));

        let plain = CellContent::Label("Terminal".to_string());
        assert_eq!(label_text(face(plain)).as_deref(), Some("Terminal"));
    }
}
