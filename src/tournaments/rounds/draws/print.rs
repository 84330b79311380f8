//! Print-ready rendering of a draw.

use hypertext::prelude::*;

use crate::tournaments::rounds::{draws::Draw, side_names::Side};

pub struct DrawTable<'r> {
    pub draw: &'r Draw,
    pub title: &'r str,
}

impl<'r> Renderable for DrawTable<'r> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            h2 { (self.title) }
            table class="table draw" {
                thead {
                    tr {
                        th scope="col" { "Room" }
                        th scope="col" { (Side::Aff.name(false)) }
                        th scope="col" { (Side::Neg.name(false)) }
                        th scope="col" { "Judge" }
                    }
                }
                tbody {
                    @for proposal in &self.draw.proposals {
                        tr {
                            td { (proposal.room.as_deref().unwrap_or("TBA")) }
                            td { (proposal.team_of_side(Side::Aff)) }
                            td { (proposal.team_of_side(Side::Neg)) }
                            td {
                                (proposal.judge_id.as_deref().unwrap_or("TBA"))
                            }
                        }
                    }
                }
            }
            @if let Some(bye) = &self.draw.bye {
                p class="bye" {
                    "Bye: " (bye)
                }
            }
        }
        .render_to(buffer);
    }
}

/// Renders the draw as an HTML fragment suitable for printing straight from
/// a browser.
pub fn to_html(draw: &Draw, title: &str) -> String {
    DrawTable { draw, title }.render().into_inner()
}
