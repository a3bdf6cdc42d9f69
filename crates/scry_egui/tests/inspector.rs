//! End-to-end drawer behavior over headless egui passes.
//!
//! Headless passes carry no pointer or keyboard input, so these tests pin
//! the invariants that must hold on every uninteracted frame: nothing
//! reports a modification, and every degenerate input (null handles,
//! unsupported kinds, mismatched payloads, reference cycles) renders a
//! placeholder instead of panicking.

use scry_egui::demo;
use scry_egui::{CustomDrawers, Inspector};
use scry_reflect::{
    ClassFlags, ClassInfo, FieldInfo, FieldSlot, PropertyType, TypeRegistry, Value,
};
use std::cell::Cell;
use std::rc::Rc;

fn run_ui(mut body: impl FnMut(&mut egui::Ui)) {
    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| body(ui));
    });
}

/// Runs a headless pass and returns every text fragment it painted.
fn rendered_texts(mut body: impl FnMut(&mut egui::Ui)) -> Vec<String> {
    let ctx = egui::Context::default();
    let output = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| body(ui));
    });
    let mut texts = Vec::new();
    for clipped in &output.shapes {
        collect_texts(&clipped.shape, &mut texts);
    }
    texts
}

fn collect_texts(shape: &egui::epaint::Shape, out: &mut Vec<String>) {
    match shape {
        egui::epaint::Shape::Text(text) => out.push(text.galley.text().to_owned()),
        egui::epaint::Shape::Vec(shapes) => {
            for nested in shapes {
                collect_texts(nested, out);
            }
        }
        _ => {}
    }
}

fn any_text_contains(texts: &[String], needle: &str) -> bool {
    texts.iter().any(|text| text.contains(needle))
}

#[test]
fn an_uninteracted_frame_never_reports_modification() {
    let demo = demo::build();
    let inspector = Inspector::new(&demo.registry, &demo.custom);
    run_ui(|ui| {
        assert!(!inspector.draw_object(ui, &demo.hero, false, false));
        assert!(!inspector.draw_object(ui, &demo.hero, true, false));
    });
}

#[test]
fn read_only_leaf_drawers_never_report_modification() {
    let registry = TypeRegistry::default();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);

    run_ui(|ui| {
        let mut int_value = 42i32;
        let mut wide_value = u64::MAX;
        let mut float_value = 2.5f32;
        let mut flag = true;
        let mut text = String::from("hello");
        assert!(!inspector.draw_primitive(ui, "int", &mut int_value, false));
        assert!(!inspector.draw_primitive(ui, "wide", &mut wide_value, false));
        assert!(!inspector.draw_primitive(ui, "float", &mut float_value, false));
        assert!(!inspector.draw_bool(ui, "flag", &mut flag, false));
        assert!(!inspector.draw_string(ui, "text", &mut text, false));
        assert_eq!(int_value, 42);
        assert_eq!(text, "hello");
    });
}

#[test]
fn empty_read_only_strings_render_the_empty_token() {
    let registry = TypeRegistry::default();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);
    let mut empty = String::new();
    let texts = rendered_texts(|ui| {
        assert!(!inspector.draw_string(ui, "empty", &mut empty, false));
    });
    assert!(any_text_contains(&texts, "{Empty}"));
    assert!(empty.is_empty());
}

#[test]
fn null_object_fields_draw_a_red_null_placeholder() {
    let mut registry = TypeRegistry::default();
    let actor = registry.register_class(ClassInfo::new("Actor")).unwrap();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);

    let field = FieldInfo::new("target", PropertyType::Object { class: actor });
    let mut slot = FieldSlot::single(Value::Object(None));
    let texts = rendered_texts(|ui| {
        assert!(!inspector.draw_property(ui, &field, &mut slot, true, true));
    });
    assert!(any_text_contains(&texts, "NULL (Actor)"));
}

#[test]
fn unsupported_kinds_degrade_to_an_inline_warning() {
    let registry = TypeRegistry::default();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);

    let field = FieldInfo::new(
        "exotic",
        PropertyType::Unsupported {
            type_name: "FVectorNetQuantize".to_owned(),
        },
    );
    let mut slot = FieldSlot::single(Value::Bool(false));
    let texts = rendered_texts(|ui| {
        assert!(!inspector.draw_property(ui, &field, &mut slot, true, true));
    });
    assert!(any_text_contains(&texts, "Unsupported type (FVectorNetQuantize)"));
}

#[test]
fn the_inheritance_walk_nests_a_parent_section() {
    let demo = demo::build();
    let inspector = Inspector::new(&demo.registry, &demo.custom);
    let texts = rendered_texts(|ui| {
        inspector.draw_object(ui, &demo.hero, false, false);
    });
    // The most-derived level draws its own fields and folds its parent away
    // behind a `Parent:` section.
    assert!(any_text_contains(&texts, "Parent: (Character)"));
    assert!(any_text_contains(&texts, "title:"));
}

#[test]
fn pending_soft_references_render_their_unloaded_state() {
    let demo = demo::build();
    let inspector = Inspector::new(&demo.registry, &demo.custom);
    let texts = rendered_texts(|ui| {
        inspector.draw_object(ui, &demo.hero, false, false);
    });
    assert!(any_text_contains(&texts, "/world/home - UNLOADED"));
}

#[test]
fn unbound_delegates_render_the_unbound_marker() {
    let registry = TypeRegistry::default();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);

    let field = FieldInfo::new(
        "on_fire",
        PropertyType::Delegate(scry_reflect::SignatureInfo::new()),
    );
    let mut slot = FieldSlot::single(Value::Delegate(scry_reflect::DelegateValue::new()));
    let texts = rendered_texts(|ui| {
        assert!(!inspector.draw_property(ui, &field, &mut slot, true, true));
    });
    assert!(any_text_contains(&texts, "{Unbound}"));
}

#[test]
fn nested_containers_are_rejected_with_a_warning() {
    let registry = TypeRegistry::default();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);

    let field = FieldInfo::new(
        "matrix",
        PropertyType::Array(Box::new(PropertyType::Array(Box::new(PropertyType::I32)))),
    );
    let mut slot = FieldSlot::single(Value::Array(Vec::new()));
    let texts = rendered_texts(|ui| {
        assert!(!inspector.draw_property(ui, &field, &mut slot, true, false));
    });
    assert!(any_text_contains(
        &texts,
        "Containers with container elements are not supported!"
    ));
}

#[test]
fn mismatched_payloads_degrade_without_modification() {
    let registry = TypeRegistry::default();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);

    let field = FieldInfo::new("broken", PropertyType::I32);
    let mut slot = FieldSlot::single(Value::Bool(true));
    run_ui(|ui| {
        assert!(!inspector.draw_property(ui, &field, &mut slot, true, true));
    });
    assert!(matches!(slot.value(), Some(Value::Bool(true))));
}

#[test]
fn fixed_array_fields_draw_every_index() {
    let registry = TypeRegistry::default();
    let custom = CustomDrawers::default();
    let inspector = Inspector::new(&registry, &custom);

    let field = FieldInfo::new("flags", PropertyType::Bool).with_array_dim(3);
    let mut slot = registry.default_slot(&field);
    run_ui(|ui| {
        assert!(!inspector.draw_property(ui, &field, &mut slot, false, true));
    });
    assert_eq!(slot.len(), 3);
}

#[test]
fn self_referencing_objects_render_a_cycle_placeholder() {
    let mut registry = TypeRegistry::default();
    let anchor = registry.register_class(ClassInfo::new("Anchor")).unwrap();
    let holder = registry
        .register_class(
            ClassInfo::new("Holder")
                .with_parent(anchor)
                .with_flags(ClassFlags::MUTABLE)
                .with_field(FieldInfo::new(
                    "next",
                    PropertyType::Object { class: anchor },
                )),
        )
        .unwrap();
    let custom = CustomDrawers::default();

    let object = registry.instantiate(holder, "Ouroboros");
    {
        let mut instance = object.borrow_mut();
        let level = instance.level_mut(holder).unwrap();
        if let Some(value) = level.slots_mut()[0].value_mut() {
            *value = Value::Object(Some(Rc::clone(&object)));
        }
    }

    let inspector = Inspector::new(&registry, &custom);
    run_ui(|ui| {
        // The self reference is hit while the object is borrowed for its own
        // field pass; the drawer must placeholder instead of re-entering.
        assert!(!inspector.draw_object(ui, &object, false, false));
    });
}

#[test]
fn custom_drawers_replace_default_rendering_unless_forced() {
    let mut registry = TypeRegistry::default();
    let widget = registry
        .register_class(
            ClassInfo::new("Widget")
                .with_flags(ClassFlags::CUSTOM_DRAWER | ClassFlags::MUTABLE)
                .with_field(FieldInfo::new("value", PropertyType::I32)),
        )
        .unwrap();

    let invocations = Rc::new(Cell::new(0u32));
    let mut custom = CustomDrawers::new();
    let counter = Rc::clone(&invocations);
    custom.register(widget, move |_inspector, ui, _object| {
        counter.set(counter.get() + 1);
        ui.label("custom");
    });

    let object = registry.instantiate(widget, "Dial");
    let inspector = Inspector::new(&registry, &custom);

    run_ui(|ui| {
        assert!(!inspector.draw_object(ui, &object, false, false));
    });
    assert_eq!(invocations.get(), 1);

    run_ui(|ui| {
        assert!(!inspector.draw_object(ui, &object, false, true));
    });
    assert_eq!(invocations.get(), 1, "forced default must bypass the custom drawer");
}

#[test]
fn labeled_enum_and_class_entry_points_are_inert_when_read_only() {
    let demo = demo::build();
    let inspector = Inspector::new(&demo.registry, &demo.custom);

    run_ui(|ui| {
        let mut damage = 3i64;
        assert!(!inspector.draw_enum(ui, "damage", &mut damage, demo.damage_kind, false));
        assert_eq!(damage, 3);

        let mut class = Some(demo.character_class);
        assert!(!inspector.draw_class(ui, "class", &mut class, demo.actor_class, false));
        assert_eq!(class, Some(demo.character_class));

        let mut null_class = None;
        assert!(!inspector.draw_class(ui, "null", &mut null_class, demo.actor_class, false));
        assert_eq!(null_class, None);
    });
}
