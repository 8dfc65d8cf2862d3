//! Archive document
//!
//! Loads everything the archive needs from both databases, then renders the
//! HTML document in a single sequential pass. The output is meant to be
//! converted to PDF by Prince, so the stylesheet carries its page-break and
//! (commented-out) annotation hints.

use std::collections::HashMap;
use std::io::Write;

use crate::config::Settings;
use crate::error::{ArchiveError, ArchiveResult};
use crate::models::{
    CatalogCourse, CatalogStatus, Category, CategoryGroup, DateRange, DesignationRule,
};
use crate::services::{ProposalIndex, Taxonomy};
use crate::storage::{CatalogRepository, CurriculumRepository};

/// Separator between course links in a category's index
const INDEX_SEPARATOR: &str = " ● ";

const HEAD: &str = r#"<html>
  <head>
    <style>
      section {
        break-before: page;
      }
      .document-title {
        text-align: center;
      }
      #byline {
        text-align: right;
        font-style: italic;
        font-size: 0.9em;
      }
      #contents > div {
        margin-left: 1em;
        border: 1px solid black;
        padding: 1em;
        border-radius: 0.25em;
      }
      #prompts-intro {
        font-size: 0.9em;
        font-style: italic;
        margin: 1em auto;
      }
      #prompts-intro h1 {
        font-style: normal;
      }
      .inactive, .not-found {
        color: red;
      }
      /* PDF annotations need a licensed Prince build. Hovering over a prompt's
       * abbreviation could then show the prompt text instead of requiring a
       * link back to the definitions.
      #required-core-annotation::after {
        prince-pdf-annotate: text("Students must satisfy all four of these requirement areas")
      }
      */
    </style>
  </head>
  <body>
"#;

const INTRODUCTION: &str = r#"
    <!-- Introduction -->
    <p>
      This is an archive of proposals for Pathways Common Core (Required Core and Flexible Core)
      courses that were approved by the Queens College Academic Senate and the CUNY Common Core
      Review Committee (CCRC). The Senate’s Undergraduate Curriculum Committee assigned the task of
      collecting and reviewing these proposals to the <em>ad hoc</em> General Education Advisory
      Committee (GEAC). The chair of GEAC, Christopher Vickery, developed a database and website
      for managing proposal submissions, peer review, and subsequent public record. The College has
      stopped hosting the website, but a copy of the underlying database has been preserved, and
      was used to generate this archive of the successful proposals.
    </p>

    <p>
      CCRC proposals must be accompanied by a highly-structured sample syllabus for the course.
      Those syllabi are not included in this archive.
    </p>

    <p>
      College Option requirements are not subject to CCRC review, and need only be approved by the
      Academic Senate. Those proposals are included in this archive as well.
    </p>

    <p>
      For this archive, each course was examined in the <em>current</em> CUNYfirst course catalog.
      Courses that are currently missing or inactive are noted. Otherwise, each course’s current
      title is given, followed by a series of course properties in square brackets. Within the
      square brackets, the first property is the <em>designation</em>, which will normally match the
      proposal type. Following the designation, WRIC means the course is writing intensive, while
      LIT, LANG, SCI, and SYN indicate the four college option categories.
    </p>

    <p>
      <strong>Implementation Note:</strong> The archive was built from a preserved copy of the
      database as a static web page, which was then converted to PDF using the
      <a href="https://princexml.com">Prince</a> conversion tool. A dump of the database is
      available from the author.
    </p>

    <p id="byline">
      Christopher Vickery<br/>
      May, 2025
    </p>
"#;

const PROMPTS_INTRO: &str = r#"
    <section id="prompts-intro">
    <h1 id="criteria-prompts">Criteria Prompts</h1>
      <p>
        These are the criteria (prompts) for the various Pathways categories. In the
        proposals that follow, only the abbreviations are shown.
      </p>
      <p>
        All QC GenEd proposals must address the two criteria, QC-1 and QC-2, but the justifications
        for these two criteria are not submitted to the CUNY Common Core Review Committee.
      </p>
      <p>
        Flexible Core proposals must address all three of criteria, FCC-1, FCC-2, and FCC-3, plus
        three of the additional criteria specific to each FCC area.
      </p>
      <p>
        College Option proposals are not submitted to the CUNY Common Core Review Committee. They
        require only Academic Senate approval.
      </p>
    </section>
"#;

/// Everything the archive shows, loaded and grouped
#[derive(Debug, Clone)]
pub struct Archive {
    /// Span of effective dates shown in the title
    pub date_range: DateRange,
    type_names: HashMap<Category, String>,
    taxonomy: Taxonomy,
    index: ProposalIndex,
    catalog: HashMap<String, CatalogCourse>,
    designation: DesignationRule,
}

impl Archive {
    /// Run the data access, taxonomy, and grouping stages
    pub fn generate(
        catalog: &CatalogRepository,
        curriculum: &CurriculumRepository,
        settings: &Settings,
    ) -> ArchiveResult<Self> {
        let courses = catalog.load_courses(&settings.institution)?;

        let date_range = curriculum
            .date_range(settings.date_range_min_proposal)?
            .ok_or(ArchiveError::EmptyArchive)?;

        let type_names = curriculum.proposal_type_names(&Category::ALL)?;
        for category in Category::ALL {
            if !type_names.contains_key(&category) {
                tracing::warn!(category = %category, "proposal type has no full name");
            }
        }

        let taxonomy = Taxonomy::build(&curriculum.criteria()?)?;
        let index = ProposalIndex::collect(curriculum)?;

        Ok(Self::new(
            date_range,
            type_names,
            taxonomy,
            index,
            courses,
            settings.designation.clone(),
        ))
    }

    /// Assemble an archive from already-loaded parts
    pub fn new(
        date_range: DateRange,
        type_names: HashMap<Category, String>,
        taxonomy: Taxonomy,
        index: ProposalIndex,
        catalog: HashMap<String, CatalogCourse>,
        designation: DesignationRule,
    ) -> Self {
        Self {
            date_range,
            type_names,
            taxonomy,
            index,
            catalog,
            designation,
        }
    }

    /// Full name of a category, falling back to its code
    pub fn type_name(&self, category: Category) -> &str {
        self.type_names
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.code())
    }

    pub fn index(&self) -> &ProposalIndex {
        &self.index
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Current catalog standing of a course
    pub fn status(&self, course: &str) -> CatalogStatus {
        CatalogStatus::lookup(&self.catalog, course, &self.designation)
    }

    /// Write the complete HTML document
    pub fn render<W: Write>(&self, writer: &mut W) -> ArchiveResult<()> {
        writer.write_all(HEAD.as_bytes())?;
        self.render_title(writer)?;
        writer.write_all(INTRODUCTION.as_bytes())?;
        self.render_contents(writer)?;
        writer.write_all(PROMPTS_INTRO.as_bytes())?;
        self.render_criteria(writer)?;
        for category in Category::ALL {
            self.render_proposals(writer, category)?;
        }
        writeln!(writer, "</body></html>")?;
        writer.flush()?;
        Ok(())
    }

    fn render_title<W: Write>(&self, writer: &mut W) -> ArchiveResult<()> {
        writeln!(
            writer,
            r#"    <h1 class="document-title">QC Approved Pathways Proposals</h1>"#
        )?;
        writeln!(
            writer,
            r#"    <h2 class="document-title">{} through {}</h2>"#,
            self.date_range.earliest_label(),
            self.date_range.latest_label()
        )?;
        Ok(())
    }

    fn render_contents<W: Write>(&self, writer: &mut W) -> ArchiveResult<()> {
        writeln!(writer, r#"    <section id="contents">"#)?;
        writeln!(writer, "    <h2>Contents</h2>")?;
        writeln!(writer, "    <div>")?;
        writeln!(
            writer,
            r##"<h2><a href="#criteria-prompts">Criteria Prompts</a></h2>"##
        )?;
        for group in CategoryGroup::ALL {
            writeln!(writer, "<h2>{} Proposals</h2>", group.name())?;
            for category in group.categories() {
                writeln!(
                    writer,
                    r##"<div><a href="#{}">{}</a></div>"##,
                    category.code(),
                    self.type_name(*category)
                )?;
            }
        }
        writeln!(writer, "    </div>")?;
        writeln!(writer, "    </section>")?;
        Ok(())
    }

    fn render_criteria<W: Write>(&self, writer: &mut W) -> ArchiveResult<()> {
        for group in CategoryGroup::ALL {
            if group == CategoryGroup::RequiredCore {
                writeln!(
                    writer,
                    r#"<h2 id="required-core-annotation">{} Criteria</h2>"#,
                    group.name()
                )?;
            } else {
                writeln!(writer, "<h2>{} Criteria</h2>", group.name())?;
            }

            for category in group.categories() {
                let code = category.code();
                writeln!(
                    writer,
                    r#"<h3 id="criteria-{}">{}: {}</h3>"#,
                    code,
                    code,
                    self.type_name(*category)
                )?;
                for criterion in self.taxonomy.criteria_for(*category) {
                    writeln!(
                        writer,
                        "<p><strong>{}</strong>: {}</p>",
                        criterion.abbr,
                        criterion.prompt
                    )?;
                }
                writeln!(writer, r##"<p><a href="#{}">{} Proposals</a></p>"##, code, code)?;
            }
        }
        Ok(())
    }

    fn render_proposals<W: Write>(&self, writer: &mut W, category: Category) -> ArchiveResult<()> {
        let code = category.code();
        writeln!(
            writer,
            r#"<h1 id="{}" class="proposal-type">{} Proposals</h1>"#,
            code,
            self.type_name(category)
        )?;
        writeln!(
            writer,
            r##"<p><a href="#criteria-{}">{} Criteria Definitions</a></p>"##,
            code, code
        )?;

        if self.index.course_count(category) == 0 {
            writeln!(writer, "<h3>No Approved Proposals</h3>")?;
            return Ok(());
        }

        let links: Vec<String> = self
            .index
            .courses(category)
            .map(|(course, _)| {
                format!(
                    r##"<a href="#{}">{}</a>"##,
                    course_anchor(category, course),
                    course
                )
            })
            .collect();
        writeln!(writer, "<div>{}</div>", links.join(INDEX_SEPARATOR))?;

        for (course, proposal) in self.index.courses(category) {
            writeln!(
                writer,
                r#"<h3 id="{}">{} {}</h3><h4>Approved {}</h4>"#,
                course_anchor(category, course),
                course,
                status_html(&self.status(course)),
                proposal.effective_date
            )?;
            for (abbr, text) in proposal.justifications.iter() {
                writeln!(writer, "<p><strong>{}:</strong> {}</p>", abbr, text)?;
            }
        }
        Ok(())
    }
}

/// Anchor id of a course's subsection: category code plus the course without spaces
pub fn course_anchor(category: Category, course: &str) -> String {
    format!("{}{}", category.code(), course.replace(' ', ""))
}

/// Status annotation markup shown after the course identifier
pub fn status_html(status: &CatalogStatus) -> String {
    match status {
        CatalogStatus::NotFound => r#"<span class="not-found">Not Found</span>"#.to_string(),
        CatalogStatus::Inactive => {
            r#"<span class="inactive">Currently Inactive</span>"#.to_string()
        }
        active @ CatalogStatus::Active { .. } => active.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalEvent, Criterion};
    use crate::services::ApprovalSource;
    use crate::storage::fixtures::payload;
    use chrono::NaiveDate;

    fn criteria() -> Vec<Criterion> {
        ["CE-1", "FCC-1", "FCC-2", "FCC-3", "LP-1", "QC-1", "QC-2"]
            .iter()
            .map(|abbr| Criterion {
                abbr: abbr.to_string(),
                prompt: format!("Prompt {}", abbr),
            })
            .collect()
    }

    fn event(proposal: i64, course: &str, proposal_type: &str) -> ApprovalEvent {
        ApprovalEvent {
            proposal,
            course: course.into(),
            proposal_type: proposal_type.into(),
            effective_date: NaiveDate::from_ymd_opt(2014, 3, 7).unwrap(),
            payload: payload("LP-1", "Because it is a lab science."),
        }
    }

    fn archive() -> Archive {
        let mut index = ProposalIndex::new();
        index.extend(
            ApprovalSource::Ccrc,
            vec![
                event(1, "GEOL 101", "LPS"),
                event(2, "BIOL 105", "LPS"),
                event(3, "PHYS 999", "LPS"),
            ],
        );

        let mut catalog = HashMap::new();
        catalog.insert(
            "GEOL 101".to_string(),
            CatalogCourse {
                title: "Physical Geology".into(),
                is_active: true,
                designation: "RLPR".into(),
                is_sci: true,
                ..Default::default()
            },
        );
        catalog.insert(
            "BIOL 105".to_string(),
            CatalogCourse {
                title: "General Biology".into(),
                is_active: false,
                ..Default::default()
            },
        );

        let mut names = HashMap::new();
        names.insert(Category::Lps, "Life and Physical Sciences".to_string());

        Archive::new(
            DateRange {
                earliest: NaiveDate::from_ymd_opt(2012, 10, 1).unwrap(),
                latest: NaiveDate::from_ymd_opt(2016, 4, 1).unwrap(),
            },
            names,
            Taxonomy::build(&criteria()).unwrap(),
            index,
            catalog,
            DesignationRule::default(),
        )
    }

    fn rendered() -> String {
        let mut out = Vec::new();
        archive().render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_title_dates() {
        assert!(rendered().contains("October, 2012 through April, 2016"));
    }

    #[test]
    fn test_one_heading_per_category() {
        let html = rendered();
        for category in Category::ALL {
            let criteria_heading = format!(r#"<h3 id="criteria-{}">"#, category.code());
            let proposal_heading = format!(
                r#"<h1 id="{}" class="proposal-type">"#,
                category.code(),
            );
            assert_eq!(html.matches(&criteria_heading).count(), 1, "{}", category);
            assert_eq!(html.matches(&proposal_heading).count(), 1, "{}", category);
        }
    }

    #[test]
    fn test_category_order_is_stable() {
        let html = rendered();
        let positions: Vec<usize> = Category::ALL
            .iter()
            .map(|c| {
                html.find(&format!(r#"<h1 id="{}" class="proposal-type">"#, c.code()))
                    .unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_course_index_alphabetical() {
        let html = rendered();
        let expected = [
            r##"<a href="#LPSBIOL105">BIOL 105</a>"##,
            r##"<a href="#LPSGEOL101">GEOL 101</a>"##,
            r##"<a href="#LPSPHYS999">PHYS 999</a>"##,
        ]
        .join(INDEX_SEPARATOR);
        assert!(html.contains(&format!("<div>{}</div>", expected)));
    }

    #[test]
    fn test_status_annotations() {
        let html = rendered();
        assert!(html.contains(r#"<h3 id="LPSGEOL101">GEOL 101 Physical Geology [LP SCI]</h3>"#));
        assert!(html.contains(
            r#"<h3 id="LPSBIOL105">BIOL 105 <span class="inactive">Currently Inactive</span></h3>"#
        ));
        assert!(html.contains(
            r#"<h3 id="LPSPHYS999">PHYS 999 <span class="not-found">Not Found</span></h3>"#
        ));
        assert!(html.contains("<h4>Approved 2014-03-07</h4>"));
        assert!(html.contains("<p><strong>LP-1:</strong> Because it is a lab science.</p>"));
    }

    #[test]
    fn test_empty_category_placeholder() {
        let html = rendered();
        let start = html.find(r#"<h1 id="CE" class="proposal-type">"#).unwrap();
        let end = html.find(r#"<h1 id="IS" class="proposal-type">"#).unwrap();
        let section = &html[start..end];
        assert!(section.contains("<h3>No Approved Proposals</h3>"));
        assert!(!section.contains("<div>"));
        assert!(!section.contains(r##"href="#CE"##));
    }

    #[test]
    fn test_missing_type_name_falls_back_to_code() {
        let archive = archive();
        assert_eq!(archive.type_name(Category::Lps), "Life and Physical Sciences");
        assert_eq!(archive.type_name(Category::Wcgi), "WCGI");
    }

    #[test]
    fn test_criteria_section() {
        let html = rendered();
        assert!(html.contains(r#"<h3 id="criteria-LPS">LPS: Life and Physical Sciences</h3>"#));
        assert!(html.contains("<p><strong>LP-1</strong>: Prompt LP-1</p>"));
        assert!(html.contains(r##"<p><a href="#LPS">LPS Proposals</a></p>"##));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(rendered(), rendered());
    }

    #[test]
    fn test_document_closes() {
        assert!(rendered().ends_with("</body></html>\n"));
    }
}
