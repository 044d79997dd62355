// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording a real surface through the trace hooks.

use glimmer_core::backend::DiscardWriter;
use glimmer_core::color::Color;
use glimmer_core::device::{Device, DeviceInfo, DeviceLayout, DeviceType, LedLayout};
use glimmer_core::geometry::{Point, Rect};
use glimmer_core::led::{LedId, VendorId};
use glimmer_core::surface::Surface;
use glimmer_core::time::{HostTime, Timebase};
use glimmer_core::trace::{LayoutChange, Tracer};
use glimmer_core::trigger::ManualTrigger;
use glimmer_debug::pretty::PrettyPrintSink;
use glimmer_debug::recorder::{RecordedEvent, RecorderSink, decode};

fn strip(leds: u32) -> Device {
    let mut layout = DeviceLayout::new();
    for i in 0..leds {
        layout = layout.with_led(LedLayout::new(
            LedId::new(VendorId(1), i),
            Rect::from_origin_size((f64::from(i) * 10.0, 0.0), (10.0, 10.0)),
        ));
    }
    Device::new(
        DeviceInfo::new(DeviceType::LedStripe, "Acme", "Strip"),
        layout,
        Box::new(DiscardWriter),
    )
    .unwrap()
}

#[test]
fn driven_update_records_layout_then_flush() {
    let mut surface = Surface::new();
    let h = surface.add_device(strip(3));
    surface.set_location(h, Point::new(10.0, 0.0));
    surface.color_region(Rect::new(10.0, 0.0, 30.0, 10.0), 0.5, Color::WHITE);

    let mut trigger = ManualTrigger::new();
    trigger.request();
    let mut rec = RecorderSink::new();
    let report = surface
        .drive_traced(&mut trigger, HostTime(500), &mut Tracer::new(&mut rec))
        .unwrap();
    assert_eq!(report.leds_written(), 2);

    let events: Vec<_> = decode(rec.as_bytes()).collect();
    let changes: Vec<LayoutChange> = events
        .iter()
        .filter_map(|e| match e {
            RecordedEvent::Layout(l) => Some(l.change),
            _ => None,
        })
        .collect();
    assert_eq!(changes, [LayoutChange::Added, LayoutChange::Moved]);

    assert!(matches!(events[0], RecordedEvent::TriggerFired(_)));
    let flushed = events.iter().find_map(|e| match e {
        RecordedEvent::DeviceFlush(f) => Some(f.leds_written),
        _ => None,
    });
    assert_eq!(flushed, Some(2));
    assert!(matches!(
        events.last(),
        Some(RecordedEvent::UpdateSummary(s)) if s.leds_written == 2
    ));

    // Layout events are reported once.
    let mut again = RecorderSink::new();
    surface.update_traced(false, &mut Tracer::new(&mut again));
    assert!(
        !decode(again.as_bytes()).any(|e| matches!(e, RecordedEvent::Layout(_))),
        "layout events should be drained"
    );
}

#[test]
fn pretty_sink_prints_led_changes() {
    let mut surface = Surface::new();
    surface.add_device(strip(2));
    let everything = surface.bounds();
    surface.color_region(everything, 0.5, Color::rgb(1, 2, 3));

    let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS).verbose();
    surface.update_traced(false, &mut Tracer::new(&mut sink));
    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert!(out.contains("[leds] index=0 device=0@0 changes=2"), "got: {out}");
    assert!(out.contains("1:1"), "got: {out}");
}
