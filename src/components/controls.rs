use leptos::prelude::*;

use crate::session::AtlasSession;

/// Back/reset buttons, the stack breadcrumb and the category dropdowns.
#[component]
pub fn NavigationControls(session: AtlasSession) -> impl IntoView {
	let options = StoredValue::new(session.category_options());

	let category_options = options.with_value(|options| {
		options
			.iter()
			.map(|option| {
				let id = option.id;
				view! {
					<option
						value=id.index().to_string()
						prop:selected=move || session.focus().category() == Some(id)
					>
						{option.name.clone()}
					</option>
				}
			})
			.collect_view()
	});

	// Subcategories of whichever category is active.
	let subcategory_options = move || {
		let Some(category) = session.focus().category() else {
			return Vec::new();
		};
		options.with_value(|options| {
			options
				.iter()
				.find(|option| option.id == category)
				.map(|option| option.subcategories.clone())
				.unwrap_or_default()
		})
	};

	let breadcrumb = move || {
		session
			.breadcrumb()
			.into_iter()
			.map(|(_, name)| view! { <li>{name}</li> })
			.collect_view()
	};

	view! {
		<nav class="atlas-controls">
			<button on:click=move |_| session.back() disabled=move || !session.can_go_back()>
				"Back"
			</button>
			<button on:click=move |_| session.reset()>"Reset"</button>
			<ol class="breadcrumb">{breadcrumb}</ol>

			<select on:change=move |ev| session.choose_category(&event_target_value(&ev))>
				<option value="" prop:selected=move || session.focus().category().is_none()>
					"All categories"
				</option>
				{category_options}
			</select>

			<select
				on:change=move |ev| session.choose_subcategory(&event_target_value(&ev))
				disabled=move || session.focus().category().is_none()
			>
				<option value="" prop:selected=move || session.focus().subcategory().is_none()>
					"All subcategories"
				</option>
				{move || {
					subcategory_options()
						.into_iter()
						.map(|(id, name)| {
							view! {
								<option
									value=id.index().to_string()
									prop:selected=move || session.focus().subcategory() == Some(id)
								>
									{name}
								</option>
							}
						})
						.collect_view()
				}}
			</select>
		</nav>
	}
}
