//! Decoding of Query API XML responses

use rdslogs_core::domain::log_file::LogFileDescriptor;
use rdslogs_core::dto::log_file::LogFilePage;
use xml::reader::{EventReader, XmlEvent};

use crate::error::{ClientError, Result};

const RESULT_ELEMENT: &str = "DescribeDBLogFilesResult";
const DETAILS_ELEMENT: &str = "DescribeDBLogFilesDetails";

/// Fields of one `DescribeDBLogFilesDetails` element
#[derive(Default)]
struct DetailsBuilder {
    name: Option<String>,
    last_written: String,
    size: String,
}

impl DetailsBuilder {
    fn build(self) -> Result<LogFileDescriptor> {
        let name = self.name.ok_or_else(|| {
            ClientError::ParseError(format!("{DETAILS_ELEMENT} without LogFileName"))
        })?;
        let last_written = parse_number(&self.last_written, "LastWritten", &name)?;
        let size = parse_number(&self.size, "Size", &name)?;

        Ok(LogFileDescriptor::new(name, last_written, size))
    }
}

fn parse_number(raw: &str, field: &str, log_file: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| {
        ClientError::ParseError(format!("Invalid {field} '{raw}' for log file {log_file}"))
    })
}

/// Decode one page of a `DescribeDBLogFiles` response
pub(crate) fn decode_log_file_page(body: &str) -> Result<LogFilePage> {
    let mut page = LogFilePage::default();
    let mut seen_result = false;
    let mut path: Vec<String> = Vec::new();
    let mut details: Option<DetailsBuilder> = None;

    for event in EventReader::from_str(body) {
        let event = event.map_err(|e| {
            ClientError::ParseError(format!("Invalid DescribeDBLogFiles response: {e}"))
        })?;

        match event {
            XmlEvent::StartElement { name, .. } => {
                match name.local_name.as_str() {
                    RESULT_ELEMENT => seen_result = true,
                    DETAILS_ELEMENT => details = Some(DetailsBuilder::default()),
                    _ => {}
                }
                path.push(name.local_name);
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) => {
                let (parent, element) = match path.as_slice() {
                    [.., parent, element] => (parent.as_str(), element.as_str()),
                    _ => continue,
                };
                match (parent, element, details.as_mut()) {
                    (DETAILS_ELEMENT, "LogFileName", Some(d)) => {
                        d.name.get_or_insert_with(String::new).push_str(&text)
                    }
                    (DETAILS_ELEMENT, "LastWritten", Some(d)) => d.last_written.push_str(&text),
                    (DETAILS_ELEMENT, "Size", Some(d)) => d.size.push_str(&text),
                    (RESULT_ELEMENT, "Marker", _) => {
                        page.marker.get_or_insert_with(String::new).push_str(&text)
                    }
                    _ => {}
                }
            }
            XmlEvent::EndElement { name } => {
                path.pop();
                if name.local_name == DETAILS_ELEMENT {
                    if let Some(d) = details.take() {
                        page.log_files.push(d.build()?);
                    }
                }
            }
            _ => {}
        }
    }

    if !seen_result {
        return Err(ClientError::ParseError(format!(
            "Response has no {RESULT_ELEMENT} element"
        )));
    }

    page.marker = page.marker.filter(|marker| !marker.trim().is_empty());
    Ok(page)
}

/// Build the error for a non-success Query API response
///
/// The message is `<Code>: <Message>` from the `ErrorResponse` document when
/// the body has one, the raw body otherwise.
pub(crate) fn decode_error(status: u16, body: &str) -> ClientError {
    let mut code = String::new();
    let mut message = String::new();
    let mut current: Option<String> = None;

    for event in EventReader::from_str(body) {
        match event {
            Ok(XmlEvent::StartElement { name, .. }) => current = Some(name.local_name),
            Ok(XmlEvent::Characters(text)) => match current.as_deref() {
                Some("Code") => code.push_str(&text),
                Some("Message") => message.push_str(&text),
                _ => {}
            },
            Ok(XmlEvent::EndElement { .. }) => current = None,
            Ok(_) => {}
            Err(_) => break,
        }
    }

    let message = match (code.trim(), message.trim()) {
        ("", "") => body.trim().to_string(),
        (code, "") => code.to_string(),
        ("", message) => message.to_string(),
        (code, message) => format!("{code}: {message}"),
    };
    ClientError::api_error(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<DescribeDBLogFilesResponse xmlns="http://rds.amazonaws.com/doc/2014-10-31/">
  <DescribeDBLogFilesResult>
    <DescribeDBLogFiles>
      <DescribeDBLogFilesDetails>
        <LastWritten>1515761819000</LastWritten>
        <LogFileName>error/postgresql.log.2018-01-12-12</LogFileName>
        <Size>38528</Size>
      </DescribeDBLogFilesDetails>
      <DescribeDBLogFilesDetails>
        <LastWritten>1515765419000</LastWritten>
        <LogFileName>error/postgresql.log.2018-01-12-13</LogFileName>
        <Size>0</Size>
      </DescribeDBLogFilesDetails>
    </DescribeDBLogFiles>
    <Marker>next-page</Marker>
  </DescribeDBLogFilesResult>
  <ResponseMetadata>
    <RequestId>cf0daca0-e637-4f91-bb3d-42827d8b6926</RequestId>
  </ResponseMetadata>
</DescribeDBLogFilesResponse>"#;

    #[test]
    fn test_decode_page_keeps_service_order() {
        let page = decode_log_file_page(PAGE).unwrap();

        assert_eq!(page.log_files.len(), 2);
        assert_eq!(page.log_files[0].name, "error/postgresql.log.2018-01-12-12");
        assert_eq!(page.log_files[0].size_bytes, 38528);
        assert_eq!(
            page.log_files[0].last_written.timestamp_millis(),
            1515761819000
        );
        assert_eq!(page.log_files[1].name, "error/postgresql.log.2018-01-12-13");
        assert_eq!(page.marker.as_deref(), Some("next-page"));
    }

    #[test]
    fn test_decode_empty_last_page() {
        let body = r#"<DescribeDBLogFilesResponse>
  <DescribeDBLogFilesResult>
    <DescribeDBLogFiles/>
  </DescribeDBLogFilesResult>
</DescribeDBLogFilesResponse>"#;

        let page = decode_log_file_page(body).unwrap();
        assert!(page.log_files.is_empty());
        assert_eq!(page.marker, None);
    }

    #[test]
    fn test_decode_rejects_unrelated_document() {
        let err = decode_log_file_page("<Other><Thing/></Other>").unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));

        let err = decode_log_file_page("not xml at all").unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[test]
    fn test_decode_rejects_bad_size() {
        let body = r#"<DescribeDBLogFilesResponse><DescribeDBLogFilesResult><DescribeDBLogFiles>
<DescribeDBLogFilesDetails><LogFileName>a</LogFileName><Size>big</Size></DescribeDBLogFilesDetails>
</DescribeDBLogFiles></DescribeDBLogFilesResult></DescribeDBLogFilesResponse>"#;

        let err = decode_log_file_page(body).unwrap_err();
        assert!(err.to_string().contains("Invalid Size 'big' for log file a"));
    }

    #[test]
    fn test_decode_error_response() {
        let body = r#"<ErrorResponse xmlns="http://rds.amazonaws.com/doc/2014-10-31/">
  <Error>
    <Type>Sender</Type>
    <Code>DBInstanceNotFound</Code>
    <Message>DBInstance db-1 not found.</Message>
  </Error>
  <RequestId>5c2a4f0e-1b1b-4c4f-9d7e-000000000000</RequestId>
</ErrorResponse>"#;

        match decode_error(404, body) {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "DBInstanceNotFound: DBInstance db-1 not found.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_falls_back_to_body() {
        match decode_error(503, "Service Unavailable") {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
