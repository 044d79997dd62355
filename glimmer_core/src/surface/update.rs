// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface-wide updates with per-device failure isolation.

use alloc::vec::Vec;

use crate::backend::DeviceProvider;
use crate::error::{ProviderError, WriteError};
use crate::time::HostTime;
use crate::trace::{
    DeviceFailureEvent, DeviceFlushEvent, Tracer, TriggerFiredEvent, UpdateBeginEvent,
    UpdateSummary,
};
#[cfg(feature = "trace-rich")]
use crate::trace::LedChange;
use crate::trigger::UpdateTrigger;

use super::id::DeviceHandle;
use super::store::Surface;

/// The outcome of one device's update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceUpdate {
    /// The device.
    pub handle: DeviceHandle,
    /// Whether every LED was pushed, dirty or not.
    pub full_flush: bool,
    /// LEDs written, or the writer's error.
    pub result: Result<usize, WriteError>,
}

/// The outcome of one [`Surface::update`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceUpdate {
    /// Monotonic update counter.
    pub update_index: u64,
    /// One entry per device, in addition order.
    pub results: Vec<DeviceUpdate>,
}

impl SurfaceUpdate {
    /// Returns the total number of LEDs written across devices.
    #[must_use]
    pub fn leds_written(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().ok())
            .sum()
    }

    /// Iterates over the devices whose writer failed.
    pub fn failures(&self) -> impl Iterator<Item = &DeviceUpdate> + '_ {
        self.results.iter().filter(|r| r.result.is_err())
    }

    /// Returns `true` if no device failed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.results.iter().all(|r| r.result.is_ok())
    }

    /// Returns the result for one device, if it took part.
    #[must_use]
    pub fn result(&self, handle: DeviceHandle) -> Option<&Result<usize, WriteError>> {
        self.results
            .iter()
            .find(|r| r.handle == handle)
            .map(|r| &r.result)
    }
}

impl Surface {
    /// Updates every device, in addition order.
    ///
    /// Each device writes its dirty LEDs (all LEDs when `flush_all`, or when
    /// its previous write failed and
    /// [`flush_after_failure`](super::SurfaceConfig::flush_after_failure) is
    /// set). A failing device is reported in the result and does not stop
    /// the others.
    pub fn update(&mut self, flush_all: bool) -> SurfaceUpdate {
        self.update_traced(flush_all, &mut Tracer::none())
    }

    /// [`update`](Self::update) with trace events sent to `tracer`.
    ///
    /// Layout changes made since the previous update are reported first,
    /// along with how many were dropped from a full buffer.
    pub fn update_traced(&mut self, flush_all: bool, tracer: &mut Tracer<'_>) -> SurfaceUpdate {
        let update_index = self.update_index;
        self.update_index += 1;

        #[cfg(feature = "trace")]
        for e in self.pending_layout.drain(..) {
            tracer.layout(&e);
        }
        #[cfg(feature = "trace")]
        let layout_events_dropped = core::mem::take(&mut self.layout_events_dropped);
        #[cfg(not(feature = "trace"))]
        let layout_events_dropped = 0;

        tracer.update_begin(&UpdateBeginEvent {
            update_index,
            device_count: self.order.len(),
            flush_all,
            layout_events_dropped,
        });

        let flush_after_failure = self.config.flush_after_failure;
        let mut results = Vec::with_capacity(self.order.len());
        for k in 0..self.order.len() {
            let idx = self.order[k];
            let handle = self.handle_at(idx);
            let Some(device) = self.slots[idx as usize].as_mut() else {
                continue;
            };
            let full_flush = flush_all || (flush_after_failure && device.last_write_failed());

            #[cfg(feature = "trace-rich")]
            let changes: Vec<LedChange> = device
                .pending(full_flush)
                .map(|l| LedChange {
                    led: l.id(),
                    from: l.color(),
                    to: l.requested_color(),
                })
                .collect();

            let result = device.update(full_flush);
            match &result {
                Ok(0) => {}
                Ok(n) => {
                    tracer.device_flush(&DeviceFlushEvent {
                        update_index,
                        device: handle,
                        leds_written: *n,
                        full_flush,
                    });
                    #[cfg(feature = "trace-rich")]
                    tracer.led_changes(update_index, handle, &changes);
                }
                Err(e) => tracer.device_failure(&DeviceFailureEvent {
                    update_index,
                    device: handle,
                    kind: e.kind(),
                }),
            }
            results.push(DeviceUpdate {
                handle,
                full_flush,
                result,
            });
        }

        let report = SurfaceUpdate {
            update_index,
            results,
        };
        tracer.update_summary(&UpdateSummary {
            update_index,
            devices_updated: report
                .results
                .iter()
                .filter(|r| matches!(r.result, Ok(n) if n > 0))
                .count(),
            devices_failed: report.failures().count(),
            leds_written: report.leds_written(),
        });
        report
    }

    /// Polls `trigger` and updates when it fires.
    pub fn drive(&mut self, trigger: &mut dyn UpdateTrigger, now: HostTime) -> Option<SurfaceUpdate> {
        self.drive_traced(trigger, now, &mut Tracer::none())
    }

    /// [`drive`](Self::drive) with trace events sent to `tracer`.
    pub fn drive_traced(
        &mut self,
        trigger: &mut dyn UpdateTrigger,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Option<SurfaceUpdate> {
        let request = trigger.poll(now)?;
        tracer.trigger_fired(&TriggerFiredEvent {
            now,
            flush_all: request.flush_all,
        });
        Some(self.update_traced(request.flush_all, tracer))
    }

    /// Initializes `provider` and adds every device it reports, in order.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error; no device is added in that case.
    pub fn load_devices(
        &mut self,
        provider: &mut dyn DeviceProvider,
    ) -> Result<Vec<DeviceHandle>, ProviderError> {
        let devices = provider.initialize()?;
        Ok(devices.into_iter().map(|d| self.add_device(d)).collect())
    }
}
