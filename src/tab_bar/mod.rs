//! Animated tab bar controller
//!
//! Joins the static tab table against the router's routes by name and keeps
//! a set of animated values in step with the active index:
//! - per tab: highlight progress, icon scale, icon lift
//! - one indicator position that springs to the active slot
//! - three perpetual loops (indicator breathing, heartbeat badge, badge pulse)
//!
//! Loops are started once on mount and released on unmount. Dropping the
//! controller unmounts it.

pub mod badge;
pub mod layout;

pub use badge::badge_text;
pub use layout::{indicator_position, BarLayout};

use crate::animation::{Animation, Easing, SchedulerHandle, SpringConfig, Step, TaskId, ValueId};
use crate::router::{NavigationState, Navigator, RouteEntry, TabPressEvent};
use crate::types::TabDescriptor;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(250);
pub const STAGGER_PER_INDEX: Duration = Duration::from_millis(20);
pub const ACTIVE_SCALE: f64 = 1.15;
pub const ACTIVE_LIFT: f64 = -10.0;
pub const INDICATOR_SPRING: SpringConfig = SpringConfig::new(68.0, 12.0);
pub const ICON_SPRING: SpringConfig = SpringConfig::new(120.0, 8.0);

/// Mount-time options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabBarOptions {
    pub bar_width: f64,
    pub indicator_width: f64,
    /// Run the decorative loops
    pub loops: bool,
}

impl Default for TabBarOptions {
    fn default() -> Self {
        Self {
            bar_width: 80.0,
            indicator_width: 6.0,
            loops: true,
        }
    }
}

/// Outcome of [`TabBarController::press`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// Position has no control
    Ignored,
    /// A listener prevented the default action
    Vetoed { route: String },
    Navigated { route: String },
}

#[derive(Debug, Clone, Copy)]
struct TabValues {
    progress: ValueId,
    scale: ValueId,
    lift: ValueId,
}

#[derive(Debug, Clone, Copy)]
struct LoopValues {
    breathing: ValueId,
    heartbeat: ValueId,
    badge_pulse: ValueId,
}

/// A route position joined against the tab table
#[derive(Debug, Clone)]
struct Slot {
    route: String,
    descriptor: Option<usize>,
}

fn join(routes: &[RouteEntry], descriptors: &[TabDescriptor]) -> Vec<Slot> {
    routes
        .iter()
        .map(|route| Slot {
            route: route.name.clone(),
            descriptor: descriptors.iter().position(|d| d.name == route.name),
        })
        .collect()
}

/// Rendered state of one tab control
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFrame<'a> {
    pub descriptor: &'a TabDescriptor,
    pub focused: bool,
    /// Highlight ramp, 0 inactive to 1 active
    pub progress: f64,
    pub scale: f64,
    pub lift: f64,
    pub badge: Option<BadgeFrame>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadgeFrame {
    pub text: String,
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorFrame {
    pub x: f64,
    pub width: f64,
    pub scale: f64,
}

/// Snapshot of the whole bar for one render pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabBarFrame<'a> {
    /// One entry per route; `None` where the route has no tab
    pub slots: Vec<Option<SlotFrame<'a>>>,
    pub indicator: Option<IndicatorFrame>,
    pub layout: Option<BarLayout>,
}

pub struct TabBarController {
    scheduler: SchedulerHandle,
    descriptors: Vec<TabDescriptor>,
    tabs: Vec<TabValues>,
    indicator_x: ValueId,
    loops: LoopValues,
    loop_tasks: Vec<TaskId>,
    slots: Vec<Slot>,
    layout: BarLayout,
    /// Last valid active route position
    active: Option<usize>,
    mounted: bool,
}

impl TabBarController {
    /// Allocate animated values, start the loops, and sync with `nav`
    pub fn mount(
        scheduler: SchedulerHandle,
        descriptors: &[TabDescriptor],
        options: TabBarOptions,
        nav: &NavigationState,
    ) -> Self {
        let slots = join(&nav.routes, descriptors);
        let layout = BarLayout::new(options.bar_width, slots.len(), options.indicator_width);

        let (tabs, indicator_x, loops, loop_tasks) = {
            let mut s = scheduler.borrow_mut();
            let tabs = descriptors
                .iter()
                .map(|_| TabValues {
                    progress: s.create_value(0.0),
                    scale: s.create_value(1.0),
                    lift: s.create_value(0.0),
                })
                .collect();
            let indicator_x = s.create_value(layout.indicator_x(nav.index).unwrap_or(0.0));
            let loops = LoopValues {
                breathing: s.create_value(1.0),
                heartbeat: s.create_value(1.0),
                badge_pulse: s.create_value(1.0),
            };

            let mut loop_tasks = Vec::new();
            if options.loops {
                let programs = [
                    (loops.breathing, vec![Step::tween(1.03, 2000), Step::tween(1.0, 2000)]),
                    (
                        loops.heartbeat,
                        vec![Step::tween(1.2, 600), Step::tween(1.0, 600), Step::pause(800)],
                    ),
                    (loops.badge_pulse, vec![Step::tween(1.3, 1000), Step::tween(1.0, 1000)]),
                ];
                for (value, steps) in programs {
                    loop_tasks.extend(s.start(value, Animation::looping(steps)));
                }
            }
            (tabs, indicator_x, loops, loop_tasks)
        };

        info!(
            tabs = descriptors.len(),
            routes = slots.len(),
            width = layout.bar_width,
            loops = loop_tasks.len(),
            "tab bar mounted"
        );

        let mut controller = Self {
            scheduler,
            descriptors: descriptors.to_vec(),
            tabs,
            indicator_x,
            loops,
            loop_tasks,
            slots,
            layout,
            active: None,
            mounted: true,
        };
        controller.sync(nav);
        controller
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Last valid active route position
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn layout(&self) -> BarLayout {
        self.layout
    }

    /// Number of route positions that render a control
    pub fn control_count(&self) -> usize {
        self.slots.iter().filter(|s| s.descriptor.is_some()).count()
    }

    /// Bring animations in line with the router's state. Only a change of
    /// active index or of route count schedules anything.
    pub fn sync(&mut self, nav: &NavigationState) {
        if !self.mounted {
            return;
        }

        let slots = join(&nav.routes, &self.descriptors);
        let resized = slots.len() != self.slots.len();
        if resized {
            self.layout.tab_count = slots.len();
        }
        self.slots = slots;

        let index = nav.index;
        let valid = match self.slots.get(index) {
            None => {
                debug!(index, routes = self.slots.len(), "active index out of range ignored");
                false
            }
            Some(slot) if slot.descriptor.is_none() => {
                debug!(route = %slot.route, "active route has no tab");
                false
            }
            Some(_) => true,
        };
        if !valid || self.active == Some(index) {
            // Slot geometry moved under the indicator
            if resized {
                if let Some(active) = self.active {
                    self.spring_indicator(active);
                }
            }
            return;
        }
        self.active = Some(index);

        let mut s = self.scheduler.borrow_mut();
        for (pos, slot) in self.slots.iter().enumerate() {
            let Some(desc) = slot.descriptor else {
                continue;
            };
            let values = self.tabs[desc];
            let focused = pos == index;

            s.start(
                values.progress,
                Animation::timing(if focused { 1.0 } else { 0.0 }, HIGHLIGHT_DURATION)
                    .easing(Easing::EaseOut)
                    .delay(STAGGER_PER_INDEX * pos as u32),
            );
            s.start(
                values.scale,
                Animation::spring(if focused { ACTIVE_SCALE } else { 1.0 }, ICON_SPRING),
            );
            s.start(
                values.lift,
                Animation::spring(if focused { ACTIVE_LIFT } else { 0.0 }, ICON_SPRING),
            );
        }
        if let Some(x) = self.layout.indicator_x(index) {
            s.start(self.indicator_x, Animation::spring(x, INDICATOR_SPRING));
        }
    }

    /// Press the control at route position `position`.
    ///
    /// Emits a cancelable tab-press event through `navigator` and navigates
    /// only if no listener prevented it.
    pub fn press(&mut self, position: usize, navigator: &mut dyn Navigator) -> PressOutcome {
        let route = match self.slots.get(position) {
            Some(Slot {
                route,
                descriptor: Some(_),
            }) => route.clone(),
            _ => return PressOutcome::Ignored,
        };
        let focused = self.active == Some(position);

        let event = navigator.emit(TabPressEvent::new(route.as_str(), focused));
        if event.default_prevented() {
            debug!(route = %route, "tab press prevented");
            return PressOutcome::Vetoed { route };
        }

        navigator.navigate(&route);
        self.sync(navigator.state());
        PressOutcome::Navigated { route }
    }

    /// Re-measure the bar. The indicator springs to the active slot's new
    /// position.
    pub fn relayout(&mut self, bar_width: f64) {
        if !self.mounted || (self.layout.bar_width - bar_width).abs() < f64::EPSILON {
            return;
        }
        self.layout.bar_width = bar_width.max(0.0);
        debug!(width = self.layout.bar_width, "tab bar relayout");

        if let Some(active) = self.active {
            self.spring_indicator(active);
        }
    }

    fn spring_indicator(&self, index: usize) {
        if let Some(x) = self.layout.indicator_x(index) {
            self.scheduler
                .borrow_mut()
                .start(self.indicator_x, Animation::spring(x, INDICATOR_SPRING));
        }
    }

    /// Current animated state of every slot
    pub fn frame(&self) -> TabBarFrame<'_> {
        if !self.mounted {
            return TabBarFrame::default();
        }
        let s = self.scheduler.borrow();
        let read = |id: ValueId, fallback: f64| s.value(id).unwrap_or(fallback);

        let heartbeat = read(self.loops.heartbeat, 1.0);
        let badge_pulse = read(self.loops.badge_pulse, 1.0);

        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(pos, slot)| {
                let desc = slot.descriptor?;
                let descriptor = &self.descriptors[desc];
                let values = self.tabs[desc];
                Some(SlotFrame {
                    descriptor,
                    focused: self.active == Some(pos),
                    progress: read(values.progress, 0.0),
                    scale: read(values.scale, 1.0),
                    lift: read(values.lift, 0.0),
                    badge: badge_text(descriptor).map(|text| BadgeFrame {
                        text,
                        scale: if descriptor.heartbeat { heartbeat } else { badge_pulse },
                    }),
                })
            })
            .collect();

        let indicator = self.active.map(|_| IndicatorFrame {
            x: read(self.indicator_x, 0.0),
            width: self.layout.indicator_width,
            scale: read(self.loops.breathing, 1.0),
        });

        TabBarFrame {
            slots,
            indicator,
            layout: Some(self.layout),
        }
    }

    /// Stop every loop and in-flight transition and release all values.
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let Ok(mut s) = self.scheduler.try_borrow_mut() else {
            warn!("scheduler busy during tab bar unmount; animations left running");
            // Skipped while unwinding
            debug_assert!(
                std::thread::panicking(),
                "tab bar unmounted while the scheduler is borrowed"
            );
            return;
        };

        for task in self.loop_tasks.drain(..) {
            s.stop(task);
        }
        for values in &self.tabs {
            s.release(values.progress);
            s.release(values.scale);
            s.release(values.lift);
        }
        s.release(self.indicator_x);
        s.release(self.loops.breathing);
        s.release(self.loops.heartbeat);
        s.release(self.loops.badge_pulse);

        self.mounted = false;
        info!("tab bar unmounted");
    }
}

impl Drop for TabBarController {
    fn drop(&mut self) {
        self.unmount();
    }
}
