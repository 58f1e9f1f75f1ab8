//! Built-in citation styles.
//!
//! Field declarations use `Label:placeholder` pairs separated by `|`.
//! Patterns already contain escaped markup (`&amp;`, `&lt;`, `&gt;`).
//! Template names are persisted in documents, so they must never change.

use crate::format::Formatter;
use crate::model::template::{CitationTemplate, TemplateError};

pub(super) fn builtin_templates() -> Result<Vec<CitationTemplate>, TemplateError> {
    let mut templates = Vec::new();
    templates.extend(books()?);
    templates.extend(ebooks()?);
    templates.extend(encyclopedias()?);
    templates.extend(periodicals()?);
    templates.extend(newspapers()?);
    templates.extend(images()?);
    templates.extend(websites()?);
    templates.extend(broadcasts()?);
    Ok(templates)
}

fn books() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            "Book",
            concat!(
                "Last Name:Shoup | First Name Initial:K | Year of Publication:2008 |",
                "Title:Reuse your refuse | Publisher:Wiley |",
                "Place of Publication:Hoboken, N.J"
            ),
            Formatter::basic("{}, {} {}, <i>{}</i>, {}, {}"),
        )?,
        CitationTemplate::declare(
            "Book with 2 Authors",
            concat!(
                "Author 1 Last Name:Fiell | Author 1 First Name Initial:C |",
                "Author 2 Last Name:Fiell | Author 2 First Name Initial:P |",
                "Year of Publication:2005 | Title:Graphic design now |",
                "Publisher:Taschen | Place of Publication:London"
            ),
            Formatter::basic("{}, {} &amp; {}, {} {}, <i>{}</i>, {}, {}"),
        )?,
        CitationTemplate::declare(
            "Book without Author",
            concat!(
                "Title:Rome | Year of Publication:2008 |",
                "Publisher:Dorling Kindersley | Place of Publication:London"
            ),
            Formatter::basic("<i>{}</i> {}, {}, {}"),
        )?,
        CitationTemplate::declare(
            "Book with Editor",
            concat!(
                "Editor Last Name:West | Editor First Name Initial:S |",
                "Year of Publication:2005 | Title:Guide to art |",
                "Publisher:Bloomsbury | Place of Publication:London"
            ),
            Formatter::basic("{}, {} (ed.) {}, <i>{}</i>, {}, {}"),
        )?,
    ])
}

fn ebooks() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            "eBook",
            concat!(
                "Last Name:Sachar | First Name Initial:L |",
                "Year of Publication:2010 | Edition (if applicable): | Title:Holes |",
                "Publisher:Bloomsbury Publishing | Place of Publication:London |",
                "Accessed:*datenow |",
                "URL:http://books.google.com.au/books?id=vlJw20OoYqUC"
            ),
            Formatter::edition(
                "{}, {} {}, <i>{}</i>, {}, {}, accessed {}, &lt;{}&gt;",
                "{}, {} {}, {} edn, <i>{}</i>, {}, {}, accessed {}, &lt;{}&gt;",
                3,
            ),
        )?,
        CitationTemplate::declare(
            "eBook with 2 Authors",
            concat!(
                "Author 1 Last Name:Sharpley | Author 1 First Name Initial:R |",
                "Author 2 Last Name:Telfer | Author 2 First Name Initial:D |",
                "Year of Publication:2002 | Edition (if applicable): |",
                "Title:Tourism and Development: Concepts and Issues |",
                "Publisher:Channel View Publications |",
                "Place of Publication:Bristol | Accessed:*datenow |",
                "URL:https://books.google.com.au/books?id=Wvo1sIjZH3UC"
            ),
            Formatter::edition(
                "{}, {} &amp; {}, {} {}, <i>{}</i>, {}, {}, accessed {}, &lt;{}&gt;",
                "{}, {} &amp; {}, {} {}, {} edn, <i>{}</i>, {}, {}, accessed {}, &lt;{}&gt;",
                5,
            ),
        )?,
        CitationTemplate::declare(
            "eBook without Author",
            concat!(
                "Title:You've got what? | Year of Publication:2009 |",
                "Edition (if applicable):4th |",
                "Publisher:Communicable Disease Control Branch, Department of Health |",
                "Place of Publication:Adelaide | Accessed:*datenow |",
                "URL:http://www.publications.health.sa.gov.au/cgi/viewcontent.cgi?article=1029"
            ),
            Formatter::edition(
                "<i>{}</i> {}, {}, {}, accessed {}, &lt;{}&gt;",
                "<i>{}</i> {}, {} edn, {}, {}, accessed {}, &lt;{}&gt;",
                2,
            ),
        )?,
    ])
}

fn encyclopedias() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            // Why: the misspelled name is what saved documents reference.
            "Electornic Encyclopedia",
            concat!(
                "Title of Article:Earthquake | Year of Publication:2013 |",
                "Title of Encyclopedia:Encyclopaedia Britannica |",
                "Accessed:*datenow |",
                "URL:http://www.school.eb.com.au/all/comptons/article-9274104?query=earthquake"
            ),
            Formatter::basic("'{}' {}, in <i>{}</i>, accessed {}, &lt;{}&gt;"),
        )?
        .with_web_fields(0, 4)?,
        CitationTemplate::declare(
            "Printed Encyclopedia with Author",
            concat!(
                "Last Name:Pettus | First Name Initial:A M |",
                "Year of Publication:1998 | Title of Article:Edward Jenner |",
                "Title of Encyclopedia:Biographical encyclopedia of scientists |",
                "Publisher:Marshall Cavendish |",
                "Place of Publication:Tarrytown, N.Y. | Volume Number:3 |",
                "Starting Page:691 | Finishing Page:693"
            ),
            Formatter::basic("{}, {} {}, '{}' in <i>{}</i>, {}, {} vol. {}, pp. {}-{}"),
        )?,
        CitationTemplate::declare(
            "Printed Encyclopedia without Author",
            concat!(
                "Title of Article:Germany | Year of Publication:2008 |",
                "Title of Encyclopedia:The World Book | Publisher:World Book |",
                "Place of Publication:Chicago | Volume Number:8 |",
                "Starting Page:146 | Finishing Page:172"
            ),
            Formatter::basic("'{}' {} in <i>{}</i>, {}, {} vol. {}, pp. {}-{}"),
        )?,
    ])
}

fn periodicals() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            "Magazine or Journal Article with Author",
            concat!(
                "Last Name:Carter | First Name Initial:R |",
                "Year of Publication:2014 |",
                "Title of Article:Take Control of Your Dreams |",
                "Title of Magazine:BBC Focus | Volume (if applicable): |",
                "Issue (if applicable):271 |",
                "Date of Issue (if applicable):August | Starting Page:37 |",
                "Finishing Page:43"
            ),
            Formatter::issue_clauses("{}, {} {} '{}', <i>{}</i>,{}{}{} pp. {}-{}", 5),
        )?,
        CitationTemplate::declare(
            "Magazine or Journal Article without Author",
            concat!(
                "Title of Article:Appliances of Science | Year of Publication:2014 |",
                "Title of Magazine:BBC Focus | Volume (if applicable): |",
                "Issue (if applicable):271 |",
                "Date of Issue (if applicable):August | Starting Page:87 |",
                "Finishing Page:87"
            ),
            // Why: the clause slots hold volume, issue and date; a second page
            // clause would leave one more slot than there are fields.
            Formatter::issue_clauses("'{}' {}, <i>{}</i>,{}{}{} pp. {}-{}", 3),
        )?,
        CitationTemplate::declare(
            "Online Magazine or Journal Article with Author",
            concat!(
                "Last Name:Keneley | First Name Initial:M |",
                "Year of Publication:2004 |",
                "Title of Article:The dying town syndrome: a survey of urban development ",
                "in the Western District of Victoria 1830 - 1930 |",
                "Title of Magazine:Electronic Journal of Australian and New Zealand History |",
                "Volume (if applicable): | Issue (if applicable): |",
                "Date of Issue (if applicable):19 February | Accessed:*datenow |",
                "URL:http://www.jcu.edu.au/aff/history/articles/keneley3.htm"
            ),
            Formatter::issue_clauses("{}, {} {} '{}', <i>{}</i>,{}{}{} accessed {}, &lt;{}&gt;", 5),
        )?
        .with_web_fields(3, 9)?,
        CitationTemplate::declare(
            "Online Magazine or Journal Article without Author",
            concat!(
                "Title of Article:Logging off? | Year of Publication:2010 |",
                "Title of Magazine:New Internationalist | Volume (if applicable): |",
                "Issue (if applicable):432 | Date of Issue (if applicable):May |",
                "Accessed:*datenow |",
                "URL:http://www.newint.org/columns/currents/2010/05/01/illegal-logging-madagascar"
            ),
            // Why: online articles carry no page numbers; the pattern has one
            // slot per declared field.
            Formatter::issue_clauses("'{}', {} <i>{}</i>,{}{}{} accessed {}, &lt;{}&gt;", 3),
        )?
        .with_web_fields(0, 7)?,
    ])
}

fn newspapers() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            "Newsaper Article with Author",
            concat!(
                "Last Name:Bourke | First Name Initial:L |",
                "Year of Publication:2014 |",
                "Title of Article:New push to hit online buys with GST |",
                "Title of Newspaper:The Canberra Times |",
                "Date of Issue:27 December | Starting Page:1 |",
                "Finishing Page:"
            ),
            Formatter::page_range("{}, {} {} '{}', <i>{}</i>, {}, {}", 6, 7),
        )?,
        CitationTemplate::declare(
            "Newsaper Article without Author",
            concat!(
                "Title of Article:Aspirin put to the test | Year of Publication:2005 |",
                "Title of Newspaper:Advertiser |",
                "Date of Issue:18 January | Starting Page:23 |",
                "Finishing Page:"
            ),
            Formatter::page_range("'{}', {}, <i>{}</i>, {}, {}", 4, 5),
        )?,
        CitationTemplate::declare(
            "Online Newsaper Article with Author",
            concat!(
                "Last Name:Bourke | First Name Initial:L |",
                "Year of Publication:2014 |",
                "Title of Article:AirAsia QZ8501: Australia joins search for missing AirAsia flight |",
                "Title of Newspaper:The Canberra Times |",
                "Date of Issue:29 December | Accessed:*datenow |",
                "URL:http://www.canberratimes.com.au/federal-politics/political-news/",
                "airasia-qz8501-australia-joins-search-for-missing-airasia-flight-20141229-12exkr.html"
            ),
            Formatter::basic("{}, {} {} '{}', <i>{}</i>, {}, accessed {}, &lt;{}&gt;"),
        )?
        .with_web_fields(3, 7)?,
        CitationTemplate::declare(
            "Online Article without Author",
            concat!(
                "Title of Article:Google street view broke privacy law |",
                "Year of Publication:2010 | Title of Newspaper:Advertiser |",
                "Date of Issue:9 July | Accessed:*datenow |",
                "URL:http://www.adelaidenow.com.au/google-street-view-broke-",
                "privacy-law/story-e6frea8c-1225890011209"
            ),
            Formatter::basic("'{}', {}, <i>{}</i>, {}, accessed {}, &lt;{}&gt;"),
        )?
        .with_web_fields(0, 5)?,
    ])
}

fn images() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            "Image with Creator (Real Name)",
            concat!(
                "Last Name:Ganguly | First Name Initial:B | Year Created:2010 |",
                "Title or Description:Chicken Egg without Eggshell | Format:Photo |",
                "Sponsor or Organisation:Wikimedia Commons | Accessed:*datenow |",
                "URL:http://commons.wikimedia.org/wiki/File:Chicken_Egg_without_Eggshell_5859.jpg |",
                "License URL (if available):http://commons.wikimedia.org/wiki/",
                "Commons:GNU_Free_Documentation_License,_version_1.2"
            ),
            Formatter::license("{}, {} {}, <i>{}</i>, {}, {}, accessed {}, &lt;{}&gt;{}", 8),
        )?,
        CitationTemplate::declare(
            "Image with Creator (Screen Name)",
            concat!(
                "Screen Name or User Name:Dschwen | Year Created:2009 |",
                "Title or Description:Looking north from Chicago 'L' station |",
                "Format:Photo | Sponsor or Organisation:Wikimedia Commons |",
                "Accessed:*datenow | URL:http://commons.wikimedia.org/wiki/File:CTA_Night.jpg |",
                "License URL (if available):http://creativecommons.org/licenses/by-sa/4.0/deed.en"
            ),
            Formatter::license("{} {}, <i>{}</i>, {}, {}, accessed {}, &lt;{}&gt;{}", 7),
        )?,
        CitationTemplate::declare(
            "Image without Creator",
            concat!(
                "Title or Description:OLPC XO Laptop with Screen Twisted |",
                "Year Created:n.d. | Format:Photo |",
                "Sponsor or Organisation:One Laptop Per Child |",
                "Accessed:*datenow |",
                "URL:http://one.laptop.org/sites/default/files/hardware-left-side-view.png |",
                "License URL (if available):"
            ),
            Formatter::license("<i>{}</i> {}, {}, {}, accessed {}, &lt;{}&gt;{}", 6),
        )?,
    ])
}

fn websites() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            "Website with Author",
            concat!(
                "Last Name:Lesinski | First Name Initial:K | Last Update:2014 |",
                "Title of Webpage:MozJPEG 3.0 |",
                "Sponsor or Organisation:Performance Calendar | Accessed:*datenow |",
                "URL:http://calendar.perfplanet.com/2014/mozjpeg-3-0/"
            ),
            Formatter::basic("{}, {} {}, <i>{}</i>, {}, accessed {}, &lt;{}&gt;"),
        )?
        .with_web_fields(3, 6)?,
        CitationTemplate::declare(
            "Website by Organisation",
            concat!(
                "Name of Organisation:Sugar Labs | Last Update:2010 |",
                "Title of Webpage:Sugar Labs-learning software for children |",
                "Sponsor or Organisation:Sugar Labs |",
                "Accessed:*datenow | URL:http://sugarlabs.org/"
            ),
            Formatter::basic("{} {}, <i>{}</i>, {}, accessed {}, &lt;{}&gt;"),
        )?
        .with_web_fields(2, 5)?,
        CitationTemplate::declare(
            "Website without Author",
            concat!(
                "Title of Webpage:Avocado Jackpot | Year Created:2014 |",
                "Sponsor or Organisation:Reddit | Accessed:*datenow |",
                "URL:http://www.reddit.com/r/food/comments/2qnbpc/avocado_jackpot/"
            ),
            Formatter::basic("<i>{}</i> {}, {}, accessed {}, &lt;{}&gt;"),
        )?
        .with_web_fields(0, 4)?,
    ])
}

fn broadcasts() -> Result<Vec<CitationTemplate>, TemplateError> {
    Ok(vec![
        CitationTemplate::declare(
            "Film",
            concat!(
                "Title:Toy Story 2 | Year Created:1999 | Format:DVD |",
                "Distributor:Buena Vista Home Entertainment |",
                "Place (if available): |",
                "Special Credits or Other Information:A Pixar Animation Studios Film"
            ),
            Formatter::place("<i>{}</i> {}, {}, {}{}. {}", 4),
        )?,
        CitationTemplate::declare(
            "Television Program (Single)",
            concat!(
                "Title:Ten Bucks A Liter | Year of Broadcast:2013 | Format:iview |",
                "Television Channel:ABC | Place (if available): |",
                "Date of Broadcast:1 August"
            ),
            Formatter::place("<i>{}</i> {}, {}, {}{}, {}", 4),
        )?,
        CitationTemplate::declare(
            "Television Program (Part of Series)",
            concat!(
                "Episode Title:Radio Goodies | Year of Broadcast:1970 |",
                "Series Title:The Goodies | Format:DVD |",
                "Television Channel:BBC | Place (if available): |",
                "Date of Broadcast:20 December"
            ),
            Formatter::place("<i>{}</i> {}, {}, {}, {}{}, {}", 5),
        )?,
    ])
}
