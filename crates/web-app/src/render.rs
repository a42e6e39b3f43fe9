use knight_domain::{Card, Cell, ChecklistItem, DayTile, Tile, Tone, View};
use maud::{Markup, html};

/// Markup of the metrics panel.
#[must_use]
pub fn render_cards(cards: &[Card]) -> Markup {
    html! {
        @if cards.is_empty() {
            p class="col-span-full text-center text-gray-500 p-4" { "No metrics registered" }
        } @else {
            @for card in cards {
                (render_card(card))
            }
        }
    }
}

#[must_use]
pub fn render_card(card: &Card) -> Markup {
    html! {
        div class="bg-white rounded-xl shadow-md p-4" data-metric=(card.id) {
            h3 class="text-lg font-semibold text-knight-blue-deep mb-3" { (card.name) }
            @if let Some(description) = &card.description {
                p class="text-sm text-gray-500 mb-3" { (description) }
            }
            div class="metric-content" {
                @match &card.content {
                    Ok(view) => { (render_view(view)) }
                    Err(_) => { p class="text-red-500 text-sm" { "Error calculating metric" } }
                }
            }
        }
    }
}

#[must_use]
pub fn render_view(view: &View) -> Markup {
    match view {
        View::Placeholder(message) => html! {
            div class="p-4 text-center text-gray-500" { (message) }
        },
        View::Table { columns, rows } => render_table(columns, rows),
        View::Checklist(items) => html! {
            div class="space-y-2" {
                @for item in items { (render_checklist_item(item)) }
            }
        },
        View::Tiles(tiles) => html! {
            div class="grid grid-cols-2 gap-4" {
                @for tile in tiles { (render_tile(tile)) }
            }
        },
        View::Days(days) => html! {
            div class="flex gap-2 justify-between" {
                @for day in days { (render_day(day)) }
            }
        },
    }
}

fn render_table(columns: &[String], rows: &[Vec<Cell>]) -> Markup {
    html! {
        table class="w-full text-sm" {
            thead class="bg-gray-50" {
                tr {
                    @for (i, column) in columns.iter().enumerate() {
                        th class={ (if i == 0 { "text-left" } else { "text-center" }) " p-2" } {
                            (column)
                        }
                    }
                }
            }
            tbody class="divide-y divide-gray-100" {
                @for row in rows {
                    tr {
                        @for (i, cell) in row.iter().enumerate() {
                            @let align = if i == 0 { "" } else { "text-center " };
                            td class={ (align) "p-2 " (tone_class(cell.tone)) } { (cell.text) }
                        }
                    }
                }
            }
        }
    }
}

fn render_checklist_item(item: &ChecklistItem) -> Markup {
    let (checkbox, text) = if item.checked {
        ("bg-green-500 border-green-500", "text-gray-900")
    } else {
        ("bg-white border-gray-300", "text-gray-500")
    };
    html! {
        div class="flex items-center gap-3 p-2 bg-gray-50 rounded-lg" {
            div class={ "w-5 h-5 rounded border-2 " (checkbox) } {
                @if item.checked { "✓" }
            }
            span class={ "flex-1 " (text) } { (item.label) }
        }
    }
}

fn render_tile(tile: &Tile) -> Markup {
    html! {
        div class="bg-gray-50 p-3 rounded-lg text-center" {
            div class="text-2xl font-bold text-knight-blue" { (tile.value) }
            div class="text-xs text-gray-600" { (tile.label) }
        }
    }
}

fn render_day(day: &DayTile) -> Markup {
    let colors = if day.active {
        "bg-knight-blue text-white"
    } else {
        "bg-gray-100 text-gray-400"
    };
    html! {
        div class="flex-1 text-center" {
            div class="text-xs text-gray-500 mb-1" { (day.name) }
            div class={ "h-16 rounded-lg flex flex-col items-center justify-center " (colors) } {
                @if day.active {
                    div class="text-lg font-bold" { (day.sets) }
                    div class="text-xs opacity-75" { "sets" }
                } @else {
                    div class="text-xs" { "Rest" }
                }
            }
        }
    }
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "text-gray-900",
        Tone::Muted => "text-gray-500",
        Tone::Warning => "text-yellow-600 font-medium",
        Tone::Success => "text-green-600 font-medium",
        Tone::Danger => "text-red-600 font-medium",
    }
}
