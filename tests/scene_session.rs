use kinship_graph_canvas::components::force_graph::{
	DeterministicTextMeasurer, GraphData, GraphError, GraphLink, GraphNode, SceneConfig,
	SceneEvent, SceneHost, SceneSession, ScreenPoint, WorldPoint,
};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;

fn person(id: &str, label: &str) -> GraphNode {
	GraphNode {
		id: id.into(),
		label: Some(label.into()),
		kind: "person".into(),
	}
}

fn link(source: &str, target: &str) -> GraphLink {
	GraphLink {
		source: source.into(),
		target: target.into(),
		label: None,
	}
}

fn lovelace() -> GraphData {
	GraphData {
		nodes: vec![
			person("p1", "Ada Lovelace"),
			person("p2", "Annabella Byron"),
		],
		links: vec![link("p1", "p2")],
	}
}

fn session(data: &GraphData) -> SceneSession {
	SceneSession::new(
		data,
		WIDTH,
		HEIGHT,
		&SceneConfig::default(),
		&DeterministicTextMeasurer::default(),
	)
	.unwrap()
}

/// Feeds frame events until the simulation stops stepping.
fn run_frames(session: &mut SceneSession) -> usize {
	let mut frames = 0;
	while frames < 5_000 && session.dispatch(SceneEvent::Frame) {
		frames += 1;
	}
	frames
}

fn screen_of(session: &SceneSession, node: usize) -> ScreenPoint {
	let at = session.scene().nodes[node].at;
	session.transform().to_screen(at)
}

#[test]
fn two_person_scenario_settles_near_link_distance() {
	let mut session = session(&lovelace());
	let scene = session.scene();
	assert_eq!(scene.links.len(), 1);
	assert_eq!(scene.nodes[scene.links[0].source].id, "p1");
	assert_eq!(scene.nodes[scene.links[0].target].id, "p2");
	assert_eq!(scene.nodes[0].shape.text, "AL");
	assert_eq!(scene.nodes[1].shape.text, "AB");

	let frames = run_frames(&mut session);
	assert!(frames > 100 && frames < 5_000, "frames: {frames}");
	assert!(session.simulation().is_settled());

	let scene = session.scene();
	let distance = scene.nodes[0].at.distance(scene.nodes[1].at);
	assert!((85.0..115.0).contains(&distance), "distance {distance}");
	assert_eq!(scene.links[0].from, scene.nodes[0].at);
	assert_eq!(scene.links[0].to, scene.nodes[1].at);
	assert!(!session.dispatch(SceneEvent::Frame));
}

#[test]
fn drag_follows_pointer_through_live_transform() {
	let mut session = session(&lovelace());
	run_frames(&mut session);

	session.dispatch(SceneEvent::Zoom {
		anchor: ScreenPoint::new(400.0, 300.0),
		factor: 2.0,
	});
	let grab = screen_of(&session, 0);
	let start = session.scene().nodes[0].at;
	session.dispatch(SceneEvent::PointerDown { at: grab });
	assert_eq!(session.dragged(), Some(0));
	assert!(!session.simulation().is_settled());
	assert_eq!(session.simulation().nodes()[0].pinned(), Some(start));

	let pointer = ScreenPoint::new(520.0, 180.0);
	session.dispatch(SceneEvent::PointerMove { at: pointer });
	let first = session.transform().to_world(pointer);
	assert_eq!(session.simulation().nodes()[0].pinned(), Some(first));

	session.dispatch(SceneEvent::Wheel {
		at: ScreenPoint::new(100.0, 100.0),
		delta_y: -120.0,
	});
	session.dispatch(SceneEvent::PointerMove { at: pointer });
	let second = session.transform().to_world(pointer);
	assert_ne!(first, second);
	assert_eq!(session.simulation().nodes()[0].pinned(), Some(second));

	session.dispatch(SceneEvent::Frame);
	assert_eq!(session.scene().nodes[0].at, second);

	session.dispatch(SceneEvent::PointerUp { at: pointer });
	assert_eq!(session.dragged(), None);
	assert_eq!(session.simulation().nodes()[0].pinned(), None);
	session.dispatch(SceneEvent::Frame);
	assert_ne!(session.scene().nodes[0].at, second);
}

#[test]
fn background_drag_pans_without_touching_nodes() {
	let mut session = session(&lovelace());
	run_frames(&mut session);
	let before = session.transform();

	session.dispatch(SceneEvent::PointerDown {
		at: ScreenPoint::new(5.0, 5.0),
	});
	assert!(session.is_panning());
	session.dispatch(SceneEvent::PointerMove {
		at: ScreenPoint::new(35.0, 45.0),
	});
	session.dispatch(SceneEvent::PointerMove {
		at: ScreenPoint::new(25.0, 15.0),
	});
	session.dispatch(SceneEvent::PointerUp {
		at: ScreenPoint::new(25.0, 15.0),
	});

	let after = session.transform();
	assert!(!session.is_panning());
	assert_eq!(after.k, before.k);
	assert_eq!(after.x - before.x, 20.0);
	assert_eq!(after.y - before.y, 10.0);
	assert!(session.simulation().nodes().iter().all(|n| !n.is_pinned()));
	assert!(session.simulation().is_settled());
}

#[test]
fn zoom_during_pan_carries_into_next_move() {
	let mut session = session(&lovelace());
	run_frames(&mut session);

	session.dispatch(SceneEvent::PointerDown {
		at: ScreenPoint::new(5.0, 5.0),
	});
	session.dispatch(SceneEvent::PointerMove {
		at: ScreenPoint::new(35.0, 45.0),
	});
	let anchor = ScreenPoint::new(400.0, 300.0);
	session.dispatch(SceneEvent::Zoom {
		anchor,
		factor: 2.0,
	});
	let zoomed = session.transform();
	let under_anchor = zoomed.to_world(anchor);
	assert_eq!(zoomed.k, 2.0);

	session.dispatch(SceneEvent::PointerMove {
		at: ScreenPoint::new(45.0, 50.0),
	});
	let after = session.transform();
	assert_eq!(after.k, 2.0);
	let moved = after.to_screen(under_anchor);
	assert!((moved.x - (anchor.x + 10.0)).abs() < 1e-9);
	assert!((moved.y - (anchor.y + 5.0)).abs() < 1e-9);
	assert!(session.is_panning());
}

#[test]
fn tooltip_tracks_pointer_in_screen_space() {
	let mut session = session(&lovelace());
	run_frames(&mut session);
	session.dispatch(SceneEvent::Zoom {
		anchor: ScreenPoint::new(0.0, 0.0),
		factor: 3.0,
	});

	let over = screen_of(&session, 0);
	session.dispatch(SceneEvent::PointerMove { at: over });
	let tip = session.tooltip();
	assert!(tip.visible);
	assert_eq!(tip.text, "Ada Lovelace");
	assert_eq!(tip.anchor, over.offset(12.0, -12.0));

	let nudged = over.offset(2.0, 1.0);
	session.dispatch(SceneEvent::PointerMove { at: nudged });
	assert_eq!(session.tooltip().text, "Ada Lovelace");
	assert_eq!(session.tooltip().anchor, nudged.offset(12.0, -12.0));

	session.dispatch(SceneEvent::PointerMove {
		at: ScreenPoint::new(1.0, 1.0),
	});
	assert!(!session.tooltip().visible);
	assert_eq!(session.hovered(), None);
}

#[test]
fn unlabeled_node_shows_identifier() {
	let data = GraphData {
		nodes: vec![GraphNode {
			id: "urn:family:F1".into(),
			label: None,
			kind: "family".into(),
		}],
		links: vec![],
	};
	let mut session = session(&data);
	run_frames(&mut session);
	let over = screen_of(&session, 0);
	session.dispatch(SceneEvent::PointerMove { at: over });
	assert_eq!(session.tooltip().text, "urn:family:F1");
	assert_eq!(session.scene().nodes[0].shape.text, "UR");
}

#[test]
fn scale_stays_bounded_under_any_gesture_sequence() {
	let mut session = session(&lovelace());
	let anchors = [
		ScreenPoint::new(0.0, 0.0),
		ScreenPoint::new(400.0, 300.0),
		ScreenPoint::new(-50.0, 900.0),
	];
	for i in 0..400 {
		let at = anchors[i % anchors.len()];
		let event = match i % 5 {
			0 => SceneEvent::Wheel { at, delta_y: -1.0e6 },
			1 => SceneEvent::Zoom {
				anchor: at,
				factor: 1.0e9,
			},
			2 => SceneEvent::Zoom {
				anchor: at,
				factor: 1.0e-9,
			},
			3 => SceneEvent::Wheel { at, delta_y: 3.0 },
			_ => SceneEvent::Zoom {
				anchor: at,
				factor: 0.0,
			},
		};
		session.dispatch(event);
		let k = session.transform().k;
		assert!((0.1..=4.0).contains(&k), "k = {k} after event {i}");
	}
}

#[test]
fn resize_recenters_layout() {
	let mut session = session(&lovelace());
	run_frames(&mut session);
	session.dispatch(SceneEvent::Resize {
		width: 1200.0,
		height: 400.0,
	});
	assert_eq!(session.simulation().center(), WorldPoint::new(600.0, 200.0));
	run_frames(&mut session);
	let scene = session.scene();
	let cx = (scene.nodes[0].at.x + scene.nodes[1].at.x) / 2.0;
	let cy = (scene.nodes[0].at.y + scene.nodes[1].at.y) / 2.0;
	assert!((cx - 600.0).abs() < 1.0 && (cy - 200.0).abs() < 1.0);
}

#[test]
fn loading_a_new_graph_leaves_nothing_of_the_old_one() {
	let measurer = DeterministicTextMeasurer::default();
	let mut host = SceneHost::new(SceneConfig::default());

	let first = host.load(&lovelace(), WIDTH, HEIGHT, &measurer).unwrap();
	for _ in 0..10 {
		assert!(host.dispatch(first, SceneEvent::Frame));
	}

	let other = GraphData {
		nodes: vec![
			person("q1", "Charles Babbage"),
			person("q2", "Georgiana Whitmore"),
			person("q3", "Benjamin Babbage"),
		],
		links: vec![link("q1", "q2"), link("q3", "q1")],
	};
	let second = host.load(&other, WIDTH, HEIGHT, &measurer).unwrap();
	assert_ne!(first, second);
	assert!(!host.is_current(first));

	// A frame callback still holding the old generation is ignored.
	assert!(!host.dispatch(first, SceneEvent::Frame));
	let session = host.session().unwrap();
	assert_eq!(session.scene().frames, 0);
	let ids: Vec<_> = session.scene().nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, ["q1", "q2", "q3"]);
	assert_eq!(session.scene().links.len(), 2);
	assert_eq!(session.simulation().nodes().len(), 3);

	assert!(host.dispatch(second, SceneEvent::Frame));
	assert_eq!(host.session().unwrap().scene().frames, 1);
}

#[test]
fn failed_load_reports_error_and_leaves_host_empty() {
	let measurer = DeterministicTextMeasurer::default();
	let mut host = SceneHost::new(SceneConfig::default());
	let first = host.load(&lovelace(), WIDTH, HEIGHT, &measurer).unwrap();

	let broken = GraphData {
		nodes: vec![person("p1", "Ada Lovelace")],
		links: vec![link("p1", "nobody")],
	};
	let err = host.load(&broken, WIDTH, HEIGHT, &measurer).unwrap_err();
	assert!(matches!(err, GraphError::MissingEndpoint { ref id, .. } if id == "nobody"));
	assert!(host.session().is_none());
	assert!(!host.is_current(first));
	assert!(!host.dispatch(host.generation(), SceneEvent::Frame));
}
