use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::SceneConfig;
use super::events::SceneEvent;
use super::host::SceneHost;
use super::label::TextStyle;
use super::render::{self, CanvasTextMeasurer};
use super::space::ScreenPoint;
use super::tooltip::TooltipState;
use super::types::GraphData;

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()?
		.dyn_into::<CanvasRenderingContext2d>()
		.ok()
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<ScreenPoint> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(ScreenPoint::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] config: Option<SceneConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let font = TextStyle::from(&config.label);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host = Rc::new(RefCell::new(SceneHost::new(config)));
	let ctx_cell: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(TooltipState::default());
	let load_error = RwSignal::new(None::<String>);

	// Single entry point for pointer input; the tooltip signal mirrors the session after each event.
	let dispatch = {
		let host = host.clone();
		move |event: SceneEvent| {
			let mut host = host.borrow_mut();
			let generation = host.generation();
			host.dispatch(generation, event);
			if let Some(session) = host.session() {
				let next = session.tooltip();
				if tooltip.with_untracked(|current| current != next) {
					tooltip.set(next.clone());
				}
			}
		}
	};

	let (host_init, ctx_init) = (host.clone(), ctx_cell.clone());
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let existing = ctx_init.borrow().clone();
		let ctx = match existing {
			Some(ctx) => ctx,
			None => {
				let Some(ctx) = context_2d(&canvas) else {
					log::error!("canvas has no 2d context");
					return;
				};
				*ctx_init.borrow_mut() = Some(ctx.clone());
				ctx
			}
		};

		tooltip.set(TooltipState::default());
		let loaded = host_init
			.borrow_mut()
			.load(&graph, w, h, &CanvasTextMeasurer::new(&ctx));
		match loaded {
			Ok(_) => load_error.set(None),
			Err(err) => load_error.set(Some(err.to_string())),
		}

		if fullscreen && resize_cb.borrow().is_none() {
			let (host_resize, canvas_resize) = (host_init.clone(), canvas.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				let mut host = host_resize.borrow_mut();
				let generation = host.generation();
				host.dispatch(
					generation,
					SceneEvent::Resize {
						width: nw,
						height: nh,
					},
				);
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// One frame loop per component; it always drives whichever session is current.
		if animate.borrow().is_none() {
			let (host_anim, ctx_anim, animate_inner) =
				(host_init.clone(), ctx_init.clone(), animate.clone());
			let font = font.clone();
			*animate.borrow_mut() = Some(Closure::new(move || {
				{
					let mut host = host_anim.borrow_mut();
					let generation = host.generation();
					host.dispatch(generation, SceneEvent::Frame);
					if let (Some(session), Some(ctx)) = (host.session(), ctx_anim.borrow().as_ref()) {
						render::render(session, ctx, &font);
					}
				}
				if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}));
			if let Some(ref cb) = *animate.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}
	});

	let dispatch_md = dispatch.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(at) = canvas_point(canvas_ref, &ev) {
			dispatch_md(SceneEvent::PointerDown { at });
		}
	};

	let dispatch_mm = dispatch.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(at) = canvas_point(canvas_ref, &ev) {
			dispatch_mm(SceneEvent::PointerMove { at });
		}
	};

	let dispatch_mu = dispatch.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some(at) = canvas_point(canvas_ref, &ev) {
			dispatch_mu(SceneEvent::PointerUp { at });
		}
	};

	let dispatch_ml = dispatch.clone();
	let on_mouseleave = move |_: MouseEvent| {
		dispatch_ml(SceneEvent::PointerLeave);
	};

	let dispatch_wh = dispatch;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(at) = canvas_point(canvas_ref, &ev) {
			dispatch_wh(SceneEvent::Wheel {
				at,
				delta_y: ev.delta_y(),
			});
		}
	};

	let tooltip_style = move || {
		tooltip.with(|t| {
			format!(
				"position: absolute; pointer-events: none; display: {}; left: {}px; top: {}px;",
				if t.visible { "block" } else { "none" },
				t.anchor.x,
				t.anchor.y,
			)
		})
	};

	view! {
		<div class="force-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-tooltip" style=tooltip_style>
				{move || tooltip.with(|t| t.text.clone())}
			</div>
			{move || load_error.get().map(|msg| view! { <p class="graph-error">{msg}</p> })}
		</div>
	}
}
