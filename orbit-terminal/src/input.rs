/// Translation of crossterm mouse reports into orbit input events
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use orbit_core::gesture::WHEEL_NOTCH;
use orbit_core::InputEvent;

/// Approximate pixel size of one terminal cell.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

fn button_code(button: MouseButton) -> i16 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

/// Terminals report absolute cells; the tracker wants relative pixel motion.
#[derive(Debug, Default)]
pub struct MouseTranslator {
    last_cell: Option<(u16, u16)>,
}

impl MouseTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &MouseEvent) -> Option<InputEvent> {
        let cell = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(button) => {
                self.last_cell = Some(cell);
                Some(InputEvent::MouseDown {
                    button: button_code(button),
                })
            }
            MouseEventKind::Up(button) => {
                self.last_cell = Some(cell);
                Some(InputEvent::MouseUp {
                    button: button_code(button),
                })
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                let previous = self.last_cell.replace(cell)?;
                let movement_x = (cell.0 as f32 - previous.0 as f32) * CELL_WIDTH_PX;
                let movement_y = (cell.1 as f32 - previous.1 as f32) * CELL_HEIGHT_PX;
                Some(InputEvent::MouseMove {
                    movement_x,
                    movement_y,
                })
            }
            MouseEventKind::ScrollUp => Some(InputEvent::Wheel {
                wheel_delta_y: WHEEL_NOTCH,
            }),
            MouseEventKind::ScrollDown => Some(InputEvent::Wheel {
                wheel_delta_y: -WHEEL_NOTCH,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_drag_reports_pixel_deltas() {
        let mut translator = MouseTranslator::new();
        assert_eq!(
            translator.translate(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            Some(InputEvent::MouseDown { button: 0 })
        );
        assert_eq!(
            translator.translate(&mouse(MouseEventKind::Drag(MouseButton::Left), 12, 4)),
            Some(InputEvent::MouseMove {
                movement_x: 16.0,
                movement_y: -16.0
            })
        );
    }

    #[test]
    fn test_first_motion_has_no_reference() {
        let mut translator = MouseTranslator::new();
        assert_eq!(translator.translate(&mouse(MouseEventKind::Moved, 3, 3)), None);
        assert!(translator
            .translate(&mouse(MouseEventKind::Moved, 4, 3))
            .is_some());
    }

    #[test]
    fn test_scroll_maps_to_notches() {
        let mut translator = MouseTranslator::new();
        assert_eq!(
            translator.translate(&mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(InputEvent::Wheel {
                wheel_delta_y: 120.0
            })
        );
        assert_eq!(
            translator.translate(&mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(InputEvent::Wheel {
                wheel_delta_y: -120.0
            })
        );
        assert_eq!(
            translator.translate(&mouse(MouseEventKind::Up(MouseButton::Right), 0, 0)),
            Some(InputEvent::MouseUp { button: 2 })
        );
    }
}
