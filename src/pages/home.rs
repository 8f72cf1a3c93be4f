use leptos::either::Either;
use leptos::prelude::*;
use log::error;

use crate::atlas::{AtlasConfig, Corpus, NodeId};
use crate::components::controls::NavigationControls;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::treemap::Treemap;
use crate::session::AtlasSession;

const CORPUS: &str = include_str!("../../assets/corpus.json");

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	match Corpus::from_json(CORPUS) {
		Ok(corpus) => {
			let session = AtlasSession::new(corpus, AtlasConfig::default());
			Either::Left(view! { <Atlas session=session /> })
		}
		Err(err) => {
			error!("Could not load corpus: {err}");
			Either::Right(view! {
				<h1>"Uh oh! Something went wrong!"</h1>
				<p>{err.to_string()}</p>
			})
		}
	}
}

/// Treemap and citation graph side by side, both driven by one session.
#[component]
fn Atlas(session: AtlasSession) -> impl IntoView {
	let graph_data = Signal::derive(move || session.graph_data());

	view! {
		<div class="atlas">
			<NavigationControls session=session />
			<div class="atlas-views" style="display: flex; height: 80vh;">
				<div class="atlas-treemap" style="flex: 1;">
					<Treemap session=session />
				</div>
				<div class="atlas-graph" style="flex: 1;">
					<ForceGraphCanvas
						data=graph_data
						on_select=move |id: NodeId| session.select_single(id)
					/>
				</div>
			</div>
			<p class="subtitle">
				"Click a tile to zoom in. Click a node to see what it cites and what cites it."
			</p>
		</div>
	}
}
