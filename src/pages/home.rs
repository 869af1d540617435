use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::force_graph::{
	ForceGraphCanvas, GraphData, GraphLink, GraphNode, ParseResponse, RecordCount,
};

const GIVEN_NAMES: &[&str] = &[
	"Ada", "Annabella", "George", "Augusta", "Byron", "Ralph", "Anne", "William", "Judith",
	"Catherine", "John", "Mary",
];
const SURNAMES: &[&str] = &["Lovelace", "Byron", "Milbanke", "King", "Noel", "Leigh"];

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Generate a sample family tree shaped like the parsing service's reply.
///
/// Every family has a husband and wife; children of one family become spouses
/// in later families.
fn generate_sample_response(families: usize, seed: usize) -> ParseResponse {
	let mut nodes = Vec::new();
	let mut links = Vec::new();
	let mut unmarried: Vec<String> = Vec::new();

	let add_person = |nodes: &mut Vec<GraphNode>, n: usize| {
		let id = format!("urn:person:I{n}");
		let given = GIVEN_NAMES[(rand_simple(seed + n) * GIVEN_NAMES.len() as f64) as usize];
		let surname = SURNAMES[(rand_simple(seed * 7 + n) * SURNAMES.len() as f64) as usize];
		nodes.push(GraphNode {
			id: id.clone(),
			label: Some(format!("{given} {surname}")),
			kind: "person".into(),
		});
		id
	};

	let mut persons = 0;
	for f in 0..families {
		let family_id = format!("urn:family:F{f}");
		nodes.push(GraphNode {
			id: family_id.clone(),
			label: Some(format!("F{f}")),
			kind: "family".into(),
		});

		for role in ["husband", "wife"] {
			let spouse = match unmarried.pop() {
				Some(id) => id,
				None => {
					persons += 1;
					add_person(&mut nodes, persons)
				}
			};
			links.push(GraphLink {
				source: spouse,
				target: family_id.clone(),
				label: Some(role.into()),
			});
		}

		let children = 1 + (rand_simple(seed + f * 13) * 3.0) as usize;
		for _ in 0..children {
			persons += 1;
			let child = add_person(&mut nodes, persons);
			links.push(GraphLink {
				source: child.clone(),
				target: family_id.clone(),
				label: Some("child".into()),
			});
			unmarried.insert(0, child);
		}
	}

	ParseResponse {
		count: RecordCount {
			persons: persons as u64,
			families: families as u64,
		},
		ttl: String::new(),
		graph: GraphData { nodes, links },
	}
}

/// Sample family viewer; the `:seed` route parameter picks the starting family.
#[component]
pub fn Home() -> impl IntoView {
	let params = use_params_map();
	let initial = params
		.with_untracked(|p| p.get("seed").and_then(|s| s.parse::<usize>().ok()))
		.unwrap_or(1);
	let seed = RwSignal::new(initial);
	let response = Memo::new(move |_| generate_sample_response(12, seed.get()));
	let graph_data = Signal::derive(move || response.with(|r| r.graph.clone()));
	let count = move || {
		response.with(|r| {
			format!(
				"Persons: {}  |  Families: {}",
				r.count.persons, r.count.families
			)
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=graph_data fullscreen=true />
				<div class="graph-overlay">
					<h1>"Kinship Graph"</h1>
					<p class="subtitle">"Drag people to reposition. Scroll to zoom. Drag background to pan."</p>
					<p class="count">{count}</p>
					<button on:click=move |_| seed.update(|s| *s += 1)>"Load another family"</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::build;

	#[test]
	fn sample_family_resolves() {
		for seed in 0..5 {
			let response = generate_sample_response(12, seed);
			let graph = build(&response.graph).unwrap();
			assert_eq!(
				graph.nodes.len() as u64,
				response.count.persons + response.count.families
			);
			assert!(graph.links.len() >= 12 * 3);
		}
	}
}
