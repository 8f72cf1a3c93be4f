use leptos::either::Either;
use leptos::prelude::*;

use super::force_graph::scale::group_color;
use crate::atlas::Tile;
use crate::session::AtlasSession;

/// Slice-and-dice treemap of the subtree under the navigation stack top.
/// Each child of the root is a column sized by its weight, with its own
/// children stacked inside. Every tile drills into the entry it shows.
#[component]
pub fn Treemap(session: AtlasSession) -> impl IntoView {
	let columns = move || {
		let tree = session.tree();
		if tree.root_is_article {
			let root = tree.root;
			let style = format!(
				"flex: 1; background: {}; cursor: pointer; padding: 1em;",
				group_color(session.group(root)),
			);
			return Either::Left(view! {
				<div
					class="treemap-tile article"
					style=style
					title=session.tooltip(root)
					on:click=move |_| session.drill_down(root)
				>
					<span class="treemap-label">{session.name(root)}</span>
					<p>"Click to open the article."</p>
				</div>
			});
		}
		let sections = tree
			.tiles
			.iter()
			.filter(|tile| tile.relative_depth == 1)
			.map(|tile| {
				let cells: Vec<Tile> = tree
					.tiles
					.iter()
					.filter(|t| t.relative_depth == 2 && t.parent == Some(tile.id))
					.cloned()
					.collect();
				view! { <TreemapColumn session=session tile=tile.clone() cells=cells /> }
			})
			.collect_view();
		Either::Right(sections)
	};

	view! {
		<div class="treemap" style="display: flex; width: 100%; height: 100%;">
			{columns}
		</div>
	}
}

#[component]
fn TreemapColumn(session: AtlasSession, tile: Tile, cells: Vec<Tile>) -> impl IntoView {
	let id = tile.id;
	let name = session.name(id);
	let style = format!(
		"flex: {} 1 0; background: {}; display: flex; flex-direction: column; \
		 border: 1px solid #fff; overflow: hidden; cursor: pointer;",
		tile.weight,
		group_color(session.group(id)),
	);

	view! {
		<div
			class="treemap-tile"
			class:article=session.is_leaf(id)
			style=style
			title=session.tooltip(id)
			on:click=move |_| session.drill_down(id)
		>
			<span class="treemap-label">{name}</span>
			{cells
				.into_iter()
				.map(|cell| {
					let cell_id = cell.id;
					view! {
						<div
							class="treemap-cell"
							class:article=session.is_leaf(cell_id)
							title=session.tooltip(cell_id)
							on:click=move |ev| {
								ev.stop_propagation();
								session.drill_down(cell_id);
							}
							style=format!(
								"flex: {} 1 0; border-top: 1px solid rgba(255,255,255,0.5); overflow: hidden;",
								cell.weight,
							)
						>
							{session.name(cell_id)}
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}
