use hypertext::prelude::*;

use crate::tournaments::standings::export::Tabular;

/// A ranked table laid out for printing straight from the browser.
pub struct StandingsTable<'t, T: Tabular + ?Sized> {
    pub table: &'t T,
    pub title: &'t str,
}

impl<'t, T: Tabular + ?Sized> Renderable for StandingsTable<'t, T> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let headers = self.table.headers();
        let rows = self.table.rows();

        maud! {
            h2 { (self.title) }
            table class="table standings" {
                thead {
                    tr {
                        @for header in &headers {
                            th scope="col" { (*header) }
                        }
                    }
                }
                tbody {
                    @for row in &rows {
                        tr {
                            @for cell in row {
                                td { (cell.to_string()) }
                            }
                        }
                    }
                }
            }
        }
        .render_to(buffer);
    }
}

pub fn to_html<T: Tabular + ?Sized>(table: &T, title: &str) -> String {
    StandingsTable { table, title }.render().into_inner()
}
