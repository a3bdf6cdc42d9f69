//! Leaf drawers for booleans and numeric scalars.

use scry_reflect::{PropertyKind, PropertyType, Value};

use super::{FALSE_COLOR, TRUE_COLOR, draw_type_mismatch};
use crate::context::DrawContext;
use crate::inspector::Inspector;

/// A numeric scalar the inspector can draw.
///
/// The fast step engages while Shift is held during a drag and scales with
/// the bit width of the type, so wide integers can be swept quickly.
pub trait Scalar: egui::emath::Numeric {
    /// Drag step per logical tick.
    const STEP: f64;
    /// Accelerated drag step while Shift is held.
    const FAST_STEP: f64;

    /// Read-only text for the value.
    fn format(self) -> String;
}

macro_rules! impl_scalar_int {
    ($ty:ty, $fast_step:expr) => {
        impl Scalar for $ty {
            const STEP: f64 = 1.0;
            const FAST_STEP: f64 = $fast_step;

            fn format(self) -> String {
                self.to_string()
            }
        }
    };
}

impl_scalar_int!(i8, 10.0);
impl_scalar_int!(i16, 10.0);
impl_scalar_int!(i32, 100.0);
impl_scalar_int!(i64, 1000.0);
impl_scalar_int!(u8, 10.0);
impl_scalar_int!(u16, 10.0);
impl_scalar_int!(u32, 100.0);
impl_scalar_int!(u64, 1000.0);

macro_rules! impl_scalar_float {
    ($ty:ty) => {
        impl Scalar for $ty {
            const STEP: f64 = 0.1;
            const FAST_STEP: f64 = 10.0;

            fn format(self) -> String {
                format!("{self:.6}")
            }
        }
    };
}

impl_scalar_float!(f32);
impl_scalar_float!(f64);

/// Draws a numeric scalar: an editable drag value when mutable, plain text
/// otherwise. Read-only mode never reports modification.
pub(crate) fn draw_scalar_value<T: Scalar>(
    ui: &mut egui::Ui,
    value: &mut T,
    cx: &DrawContext,
) -> bool {
    if cx.mutable {
        let fast = ui.input(|input| input.modifiers.shift);
        let speed = if fast { T::FAST_STEP } else { T::STEP };
        ui.add(egui::DragValue::new(value).speed(speed)).changed()
    } else {
        ui.label((*value).format());
        false
    }
}

/// Draws a boolean: a checkbox when mutable, colored `True`/`False` text
/// otherwise.
pub(crate) fn draw_bool_value(ui: &mut egui::Ui, value: &mut bool, cx: &DrawContext) -> bool {
    if cx.mutable {
        ui.checkbox(value, "").changed()
    } else {
        let (color, text) = if *value {
            (TRUE_COLOR, "True")
        } else {
            (FALSE_COLOR, "False")
        };
        ui.colored_label(color, text);
        false
    }
}

pub(crate) fn draw_bool_property(
    _inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    _ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let Value::Bool(value) = value else {
        return draw_type_mismatch(ui, PropertyKind::Bool);
    };
    draw_bool_value(ui, value, cx)
}

macro_rules! scalar_property_drawer {
    ($name:ident, $variant:ident) => {
        pub(crate) fn $name(
            _inspector: Inspector<'_>,
            ui: &mut egui::Ui,
            _ty: &PropertyType,
            value: &mut Value,
            cx: &DrawContext,
        ) -> bool {
            let Value::$variant(value) = value else {
                return draw_type_mismatch(ui, PropertyKind::$variant);
            };
            draw_scalar_value(ui, value, cx)
        }
    };
}

scalar_property_drawer!(draw_i8_property, I8);
scalar_property_drawer!(draw_i16_property, I16);
scalar_property_drawer!(draw_i32_property, I32);
scalar_property_drawer!(draw_i64_property, I64);
scalar_property_drawer!(draw_u8_property, U8);
scalar_property_drawer!(draw_u16_property, U16);
scalar_property_drawer!(draw_u32_property, U32);
scalar_property_drawer!(draw_u64_property, U64);
scalar_property_drawer!(draw_f32_property, F32);
scalar_property_drawer!(draw_f64_property, F64);
